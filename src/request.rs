use reqwest::Client;

use crate::Result;

/// Builds the score page URL for a candidate id.
pub fn score_url(base_url: &str, id: u64, year: u16) -> String {
    format!(
        "{}/index/detail/sbd/{id}/year/{year}",
        base_url.trim_end_matches('/')
    )
}

/// Requests a page and returns a `Result<String>` containing the HTML.
/// The status code is not inspected, error pages are handed to the parser like any other page.
pub(crate) async fn request_score_page(client: &Client, url: &str) -> Result<String> {
    let res = client.get(url).send().await?;
    let html = res.text().await?;
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_embeds_id_and_year() {
        assert_eq!(
            score_url("https://diemthi.vnexpress.net", 1000001, 2024),
            "https://diemthi.vnexpress.net/index/detail/sbd/1000001/year/2024"
        );
    }

    #[test]
    fn url_tolerates_trailing_slash() {
        assert_eq!(
            score_url("http://127.0.0.1:3000/", 7, 2023),
            "http://127.0.0.1:3000/index/detail/sbd/7/year/2023"
        );
    }
}
