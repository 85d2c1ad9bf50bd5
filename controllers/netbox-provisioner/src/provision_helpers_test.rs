//! Unit tests for provision_helpers module

#[cfg(test)]
mod tests {
    use crate::error::ProvisionerError;
    use crate::provision_helpers::{find_existing, find_or_create, Resolution};
    use netbox_client::{endpoints, CreateTagRequest, MockNetBoxClient, NetBoxClientTrait, NetBoxError, Tag};

    fn tag_request(name: &str) -> CreateTagRequest {
        CreateTagRequest {
            name: name.to_string(),
            slug: netbox_client::slugify(name),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_find_or_create_creates_when_absent() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let request = tag_request("provisioned");

        let resolution = find_or_create(
            "tag 'provisioned'",
            mock.query_tags(&[("name", "provisioned")], false),
            mock.create_tag(&request),
        )
        .await
        .unwrap();

        assert!(matches!(resolution, Resolution::Created(_)));
        assert_eq!(resolution.resource().name, "provisioned");
        assert_eq!(mock.tags().len(), 1);
    }

    #[tokio::test]
    async fn test_find_or_create_reuses_existing_without_create_call() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let existing = mock.create_tag(&tag_request("provisioned")).await.unwrap();
        let request = tag_request("provisioned");

        let resolution = find_or_create(
            "tag 'provisioned'",
            mock.query_tags(&[("name", "provisioned")], false),
            mock.create_tag(&request),
        )
        .await
        .unwrap();

        assert!(matches!(resolution, Resolution::Existing(_)));
        assert_eq!(resolution.id(), existing.id);
        // Only the setup create above reached the mock
        assert_eq!(mock.create_calls(endpoints::TAGS).len(), 1);
    }

    #[tokio::test]
    async fn test_find_or_create_reports_create_failure() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        mock.fail_creates(endpoints::TAGS);
        let request = tag_request("provisioned");

        let result = find_or_create(
            "tag 'provisioned'",
            mock.query_tags(&[("name", "provisioned")], false),
            mock.create_tag(&request),
        )
        .await;

        match result {
            Err(ProvisionerError::CreateFailed { resource, source }) => {
                assert_eq!(resource, "tag 'provisioned'");
                assert!(matches!(source, NetBoxError::Api { status: 400, .. }));
            }
            other => panic!("expected CreateFailed, got {:?}", other.map(|r| r.id())),
        }
        assert!(mock.tags().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failure_skips_create() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let request = tag_request("provisioned");
        let failing_lookup = async {
            Err::<Vec<Tag>, _>(NetBoxError::api(500u16, "Internal Server Error"))
        };

        let result = find_or_create("tag 'provisioned'", failing_lookup, mock.create_tag(&request)).await;

        assert!(matches!(result, Err(ProvisionerError::LookupFailed { .. })));
        assert!(mock.create_calls(endpoints::TAGS).is_empty());
    }

    #[tokio::test]
    async fn test_find_existing_uses_first_of_several_matches() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let first = mock.create_tag(&tag_request("dup")).await.unwrap();
        mock.create_tag(&tag_request("dup")).await.unwrap();

        let found = find_existing("tag 'dup'", mock.query_tags(&[("name", "dup")], false))
            .await
            .unwrap();

        assert_eq!(found.map(|t| t.id), Some(first.id));
    }

    #[tokio::test]
    async fn test_find_existing_none_when_no_match() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let found = find_existing("tag 'missing'", mock.query_tags(&[("name", "missing")], false))
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
