mod backend;
mod places;
mod recipes;

pub use backend::BackendClient;
pub use places::PlacesClient;
pub use recipes::RecipeApiClient;

use reqwest::Url;

use crate::error::ClientError;

/// Append path segments to a base URL, percent-encoding each one.
pub(crate) fn join_segments(base_url: &str, segments: &[&str]) -> Result<String, ClientError> {
    let mut url =
        Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(format!("{base_url}: cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_segments() {
        assert_eq!(
            join_segments("https://api.spoonacular.com", &["recipes", "42", "information"])
                .unwrap(),
            "https://api.spoonacular.com/recipes/42/information"
        );
        assert_eq!(
            join_segments("http://127.0.0.1:1234/", &["recipes", "complexSearch"]).unwrap(),
            "http://127.0.0.1:1234/recipes/complexSearch"
        );
    }

    #[test]
    fn test_join_segments_encodes() {
        let url = join_segments("https://example.com/v1", &["recipes", "../x y"]).unwrap();
        assert_eq!(url, "https://example.com/v1/recipes/..%2Fx%20y");
    }

    #[test]
    fn test_join_segments_rejects_bad_base() {
        assert!(matches!(
            join_segments("mailto:someone", &["x"]),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(join_segments("not a url", &["x"]).is_err());
    }
}
