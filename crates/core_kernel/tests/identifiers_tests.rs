//! Tests for the identifier newtypes

use core_kernel::{BatchId, DocumentId};
use proptest::prelude::*;
use uuid::Uuid;

mod document_id_tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(DocumentId::new(), DocumentId::new());
    }

    #[test]
    fn test_ids_sort_by_creation() {
        let first = DocumentId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = DocumentId::new();
        assert!(first < second);
        assert_eq!(first.as_uuid().get_version_num(), 7);
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&DocumentId::from(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn test_bare_uuid_parses() {
        let uuid = Uuid::new_v4();
        let parsed: DocumentId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_invalid_string_fails_to_parse() {
        assert!("DOC-not-a-uuid".parse::<DocumentId>().is_err());
    }
}

mod batch_id_tests {
    use super::*;

    #[test]
    fn test_display_has_prefix() {
        assert!(BatchId::new().to_string().starts_with("BAT-"));
        assert_eq!(BatchId::PREFIX, "BAT");
    }

    #[test]
    fn test_document_prefix_is_not_stripped_from_batch_id() {
        let uuid = Uuid::new_v4();
        assert!(format!("DOC-{uuid}").parse::<BatchId>().is_err());
    }
}

proptest! {
    #[test]
    fn display_then_parse_is_identity(bytes in any::<[u8; 16]>()) {
        let id = DocumentId::from(Uuid::from_bytes(bytes));
        let parsed: DocumentId = id.to_string().parse().unwrap();
        prop_assert_eq!(id, parsed);
    }
}
