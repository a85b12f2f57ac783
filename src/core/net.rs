/// Read the response body as text.
///
/// Bodies are logged at `trace` level, truncated, so recorded sessions can be
/// compared against the service without a proxy.
pub(crate) async fn get_text(resp: reqwest::Response) -> Result<String, reqwest::Error> {
    let url = resp.url().clone();
    let text = resp.text().await?;

    if tracing::enabled!(tracing::Level::TRACE) {
        let preview: String = text.chars().take(512).collect();
        tracing::trace!(%url, bytes = text.len(), body = %preview, "analytics response");
    }

    Ok(text)
}
