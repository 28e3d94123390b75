/// Builds the `cc.xml` URL for one view.
///
/// `view` is a path relative to the server root such as `view/nightly/`.
/// An empty view addresses the root feed.
pub(crate) fn view_feed_url(server_url: &str, view: &str) -> String {
    let base = server_url.trim_end_matches('/');
    let view = view.trim().trim_start_matches('/');

    if view.is_empty() {
        format!("{base}/cc.xml")
    } else if view.ends_with('/') {
        format!("{base}/{view}cc.xml")
    } else {
        format!("{base}/{view}/cc.xml")
    }
}
