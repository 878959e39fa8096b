use serde::{Deserialize, Serialize};

/// A post as the profile page sees it. Only `_id` is required on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub tag: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_shape_parses() {
        let posts: Vec<Post> = serde_json::from_str(r##"[{"_id":"p1"},{"_id":"p2","tag":"#rust"}]"##).unwrap();
        assert_eq!(posts[0].id, "p1");
        assert_eq!(posts[0].prompt, "");
        assert_eq!(posts[1].tag, "#rust");
    }
}
