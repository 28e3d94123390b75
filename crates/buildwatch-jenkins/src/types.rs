//! Raw entries of the Jenkins `cc.xml` (CCTray) status feed

use buildwatch_api::BuildRecord;

pub(crate) const PROJECT_ELEMENT: &[u8] = b"Project";

/// Attributes of one `<Project>` element. Anything else on the element is
/// ignored.
#[derive(Debug, Default)]
pub(crate) struct CcProject {
    pub name: Option<String>,
    pub web_url: Option<String>,
    pub last_build_label: Option<String>,
    pub last_build_status: Option<String>,
}

impl CcProject {
    pub fn set_attribute(&mut self, key: &[u8], value: String) {
        match key {
            b"name" => self.name = Some(value),
            b"webUrl" => self.web_url = Some(value),
            b"lastBuildLabel" => self.last_build_label = Some(value),
            b"lastBuildStatus" => self.last_build_status = Some(value),
            _ => {}
        }
    }

    /// Converts into a record, or names the first missing attribute.
    pub fn into_record(self) -> Result<BuildRecord, &'static str> {
        let name = self.name.ok_or("name")?;
        let web_url = self.web_url.ok_or("webUrl")?;
        let number = self.last_build_label.ok_or("lastBuildLabel")?;
        let status = self.last_build_status.ok_or("lastBuildStatus")?;

        Ok(BuildRecord::new(name, web_url, number, status))
    }
}
