//! `cc.xml` document parsing

use buildwatch_api::{
    BuildSet,
    FeedError,
    FeedResult,
};
use quick_xml::events::{
    BytesStart,
    Event,
};
use quick_xml::Reader;

use crate::types::{
    CcProject,
    PROJECT_ELEMENT,
};

/// Parses a status document into a build set.
///
/// Every `<Project>` element is read from its attributes, wherever it sits
/// in the tree. Entries missing a required attribute are skipped; a document
/// that is not well-formed XML, including one with more than one root
/// element, is an error.
pub fn parse_build_set(document: &str) -> FeedResult<BuildSet> {
    let mut reader = Reader::from_str(document);
    let mut builds = BuildSet::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut skipped = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            FeedError::Parse(format!(
                "Malformed status document at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(element) => {
                if depth == 0 && saw_root {
                    return Err(extra_root(&element));
                }
                saw_root = true;
                depth += 1;
                collect_project(&element, &mut builds, &mut skipped);
            }
            Event::Empty(element) => {
                if depth == 0 && saw_root {
                    return Err(extra_root(&element));
                }
                saw_root = true;
                collect_project(&element, &mut builds, &mut skipped);
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(FeedError::Parse(
            "Status document has no root element".to_string(),
        ));
    }
    if depth != 0 {
        return Err(FeedError::Parse(format!(
            "Status document ended with {depth} unclosed element(s)"
        )));
    }

    if skipped > 0 {
        tracing::debug!(skipped, parsed = builds.len(), "Skipped incomplete projects");
    }

    Ok(builds)
}

fn extra_root(element: &BytesStart<'_>) -> FeedError {
    FeedError::Parse(format!(
        "Status document has a second root element <{}>",
        String::from_utf8_lossy(element.name().as_ref())
    ))
}

fn collect_project(element: &BytesStart<'_>, builds: &mut BuildSet, skipped: &mut usize) {
    if element.name().as_ref() != PROJECT_ELEMENT {
        return;
    }

    let mut project = CcProject::default();
    for attribute in element.attributes() {
        let attribute = match attribute {
            Ok(attribute) => attribute,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping project with malformed attributes");
                *skipped += 1;
                return;
            }
        };
        let value = match attribute.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping project with undecodable attribute");
                *skipped += 1;
                return;
            }
        };
        project.set_attribute(attribute.key.as_ref(), value);
    }

    match project.into_record() {
        Ok(record) => {
            builds.insert(record);
        }
        Err(missing) => {
            tracing::debug!(missing_attribute = missing, "Skipping incomplete project");
            *skipped += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use buildwatch_api::BuildStatus;

    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Projects>
  <Project webUrl="http://ci:8088/job/core/" name="core" lastBuildLabel="118"
           lastBuildTime="2024-03-01T10:00:00Z" lastBuildStatus="Success" activity="Sleeping"/>
  <Project webUrl="http://ci:8088/job/docs/" name="docs" lastBuildLabel="7"
           lastBuildStatus="Failure" activity="Building"/>
</Projects>"#;

    #[test]
    fn test_parse_projects() {
        let builds = parse_build_set(FEED).unwrap();

        assert_eq!(builds.len(), 2);
        let core = builds.get("core").unwrap();
        assert_eq!(core.web_url, "http://ci:8088/job/core/");
        assert_eq!(core.number, "118");
        assert_eq!(core.status, BuildStatus::Success);
        assert_eq!(builds.get("docs").unwrap().status, BuildStatus::Failure);
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let doc = r#"<Projects><Project name="a" webUrl="u" lastBuildLabel="1" lastBuildStatus="Exception"/></Projects>"#;
        let builds = parse_build_set(doc).unwrap();
        assert_eq!(
            builds.get("a").unwrap().status,
            BuildStatus::Other("Exception".to_string())
        );
    }

    #[test]
    fn test_incomplete_project_is_skipped() {
        let doc = r#"<Projects>
            <Project name="a" webUrl="u" lastBuildStatus="Success"/>
            <Project name="b" webUrl="u" lastBuildLabel="3" lastBuildStatus="Success"/>
        </Projects>"#;
        let builds = parse_build_set(doc).unwrap();
        assert_eq!(builds.len(), 1);
        assert!(builds.contains("b"));
    }

    #[test]
    fn test_duplicate_project_last_write_wins() {
        let doc = r#"<Projects>
            <Project name="a" webUrl="u" lastBuildLabel="1" lastBuildStatus="Success"/>
            <Project name="a" webUrl="u" lastBuildLabel="2" lastBuildStatus="Failure"/>
        </Projects>"#;
        let builds = parse_build_set(doc).unwrap();
        assert_eq!(builds.len(), 1);
        assert_eq!(builds.get("a").unwrap().number, "2");
    }

    #[test]
    fn test_escaped_attributes() {
        let doc = r#"<Projects><Project name="a &amp; b" webUrl="http://ci/job/a?x=1&amp;y=2" lastBuildLabel="1" lastBuildStatus="Success"/></Projects>"#;
        let builds = parse_build_set(doc).unwrap();
        let record = builds.get("a & b").unwrap();
        assert_eq!(record.web_url, "http://ci/job/a?x=1&y=2");
    }

    #[test]
    fn test_nested_and_open_project_elements() {
        let doc = r#"<Views><Projects>
            <Project name="a" webUrl="u" lastBuildLabel="1" lastBuildStatus="Success"></Project>
        </Projects></Views>"#;
        let builds = parse_build_set(doc).unwrap();
        assert!(builds.contains("a"));
    }

    #[test]
    fn test_empty_projects_document() {
        let builds = parse_build_set("<Projects/>").unwrap();
        assert!(builds.is_empty());
    }

    #[test]
    fn test_mismatched_tags_are_rejected() {
        let doc = r#"<Projects><Project name="a"></Projekt></Projects>"#;
        assert!(matches!(parse_build_set(doc), Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_truncated_document_is_rejected() {
        let doc = r#"<Projects><Project name="a" webUrl="u" lastBuildLabel="1" lastBuildStatus="Success"/>"#;
        assert!(matches!(parse_build_set(doc), Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_second_root_element_is_rejected() {
        let doc = r#"<Projects/><Project name="x" webUrl="u" lastBuildLabel="1" lastBuildStatus="Success"/>"#;
        assert!(matches!(parse_build_set(doc), Err(FeedError::Parse(_))));

        let doc = r#"<Projects></Projects><Projects></Projects>"#;
        assert!(matches!(parse_build_set(doc), Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_non_xml_is_rejected() {
        assert!(matches!(parse_build_set(""), Err(FeedError::Parse(_))));
        assert!(matches!(
            parse_build_set("503 Service Unavailable"),
            Err(FeedError::Parse(_))
        ));
    }
}
