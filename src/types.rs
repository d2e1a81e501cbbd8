use serde::Deserialize;

/// A single breed as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BreedRecord {
    #[serde(rename = "breed")]
    pub name: String,
    #[serde(rename = "image")]
    pub image_url: Option<String>,
}

#[cfg(test)]
impl BreedRecord {
    pub fn new(name: impl Into<String>, image_url: Option<&str>) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.map(str::to_string),
        }
    }
}

/// Body of `GET <base-url>?page=N`: either a page of breeds or an error payload.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UpstreamResponse {
    Breeds(Vec<BreedRecord>),
    Error { error: String },
}

/// Where a display page stands right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus<'a> {
    Pending,
    Ready(&'a [BreedRecord]),
    Error(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_breed_page() {
        let body = r#"[
            {"breed": "akita", "image": "http://img/akita.jpg"},
            {"breed": "basenji", "image": null}
        ]"#;
        let resp: UpstreamResponse = serde_json::from_str(body).unwrap();
        match resp {
            UpstreamResponse::Breeds(breeds) => {
                assert_eq!(breeds.len(), 2);
                assert_eq!(breeds[0], BreedRecord::new("akita", Some("http://img/akita.jpg")));
                assert_eq!(breeds[1].image_url, None);
            }
            other => panic!("expected breeds, got {:?}", other),
        }
    }

    #[test]
    fn decodes_missing_image_as_none() {
        let resp: UpstreamResponse = serde_json::from_str(r#"[{"breed": "pug"}]"#).unwrap();
        assert!(matches!(resp, UpstreamResponse::Breeds(ref b) if b[0].image_url.is_none()));
    }

    #[test]
    fn decodes_error_payload() {
        let resp: UpstreamResponse = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert!(matches!(resp, UpstreamResponse::Error { ref error } if error == "boom"));
    }

    #[test]
    fn empty_array_is_an_empty_page() {
        let resp: UpstreamResponse = serde_json::from_str("[]").unwrap();
        assert!(matches!(resp, UpstreamResponse::Breeds(ref b) if b.is_empty()));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(serde_json::from_str::<UpstreamResponse>(r#"{"message": "hi"}"#).is_err());
    }
}
