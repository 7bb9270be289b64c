use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only snapshot of an item owned by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One page of items plus the total the list endpoint reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemsPage {
    pub data: Vec<Item>,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_empty_page() {
        let page: ItemsPage = serde_json::from_str(r#"{"data": [], "count": 0}"#).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.count, 0);
    }

    #[test]
    fn description_is_optional() {
        let json = r#"{
            "id": "6f9619ff-8b86-d011-b42d-00c04fc964ff",
            "title": "First item"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.title, "First item");
        assert!(item.description.is_none());
    }
}
