//! Unit tests for the Provisioner run

#[cfg(test)]
mod tests {
    use crate::config;
    use crate::provisioner::{Provisioner, StepOutcome};
    use crate::test_utils::*;
    use netbox_client::{endpoints, MockNetBoxClient, NestedTag, PrefixStatus};

    async fn run(mock: &MockNetBoxClient, config: &config::ProvisionerConfig) -> crate::provisioner::ProvisionReport {
        Provisioner::new(Box::new(mock.clone()), config).run().await
    }

    fn tag_ids(tags: &[NestedTag]) -> Vec<u64> {
        tags.iter().map(|t| t.id).collect()
    }

    #[tokio::test]
    async fn test_check_connection_rejected_token() {
        let mock = create_test_mock();
        mock.reject_token();
        let config = create_test_config(&[]);

        let result = Provisioner::new(Box::new(mock.clone()), &config).check_connection().await;

        assert!(matches!(
            result,
            Err(crate::error::ProvisionerError::NetBox(netbox_client::NetBoxError::Authentication(_)))
        ));
        assert!(mock.tags().is_empty());
    }

    #[tokio::test]
    async fn test_full_run_creates_every_resource() {
        let mock = create_test_mock();
        let config = create_test_config(&[]);

        let report = run(&mock, &config).await;

        assert!(report.is_complete(), "report: {:?}", report);
        assert!(matches!(report.tag, StepOutcome::Created(_)));
        assert!(matches!(report.vlan, StepOutcome::Created(_)));
        assert_eq!(report.addresses.created, 3);

        let tag = mock.tags().remove(0);
        assert_eq!(tag.slug, "provisioned");

        let group = mock.tenant_groups().remove(0);
        assert_eq!(group.slug, "cloud-customers");

        let tenant = mock.tenants().remove(0);
        assert_eq!(tenant.slug, "araz-cloud");
        assert_eq!(tenant.group.as_ref().map(|g| g.id), Some(group.id));

        let site = mock.sites().remove(0);
        assert_eq!(site.slug, "dc1");

        let vlan = mock.vlans().remove(0);
        assert_eq!(vlan.vid, 100);
        assert_eq!(vlan.name, "servers");
        assert_eq!(vlan.tenant.as_ref().map(|t| t.id), Some(tenant.id));

        let prefix = mock.prefixes().remove(0);
        assert_eq!(prefix.prefix, "10.0.0.0/24");
        assert_eq!(prefix.status.value, PrefixStatus::Active);
        assert_eq!(prefix.vlan.as_ref().map(|v| v.id), Some(vlan.id));
        assert_eq!(prefix.site.as_ref().map(|s| s.id), Some(site.id));
        assert_eq!(prefix.tenant.as_ref().map(|t| t.id), Some(tenant.id));

        for ip in mock.ip_addresses() {
            assert_eq!(ip.vlan.as_ref().map(|v| v.id), Some(vlan.id));
            assert_eq!(ip.tenant.as_ref().map(|t| t.id), Some(tenant.id));
        }
    }

    #[tokio::test]
    async fn test_range_addresses_created_in_order() {
        let mock = create_test_mock();
        let config = create_test_config(&[]);

        run(&mock, &config).await;

        assert_eq!(
            mock.create_calls(endpoints::IP_ADDRESSES),
            vec!["10.0.0.1/32", "10.0.0.2/32", "10.0.0.3/32"]
        );
    }

    #[tokio::test]
    async fn test_every_created_resource_carries_the_tag() {
        let mock = create_test_mock();
        let config = create_test_config(&[]);

        let report = run(&mock, &config).await;
        let tag_id = report.tag.id().unwrap();

        assert_eq!(tag_ids(&mock.tenant_groups()[0].tags), vec![tag_id]);
        assert_eq!(tag_ids(&mock.tenants()[0].tags), vec![tag_id]);
        assert_eq!(tag_ids(&mock.sites()[0].tags), vec![tag_id]);
        assert_eq!(tag_ids(&mock.vlans()[0].tags), vec![tag_id]);
        assert_eq!(tag_ids(&mock.prefixes()[0].tags), vec![tag_id]);
        for ip in mock.ip_addresses() {
            assert_eq!(tag_ids(&ip.tags), vec![tag_id], "{}", ip.address);
        }
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let mock = create_test_mock();
        let config = create_test_config(&[]);

        let first = run(&mock, &config).await;
        let calls_after_first: usize = [
            endpoints::TAGS,
            endpoints::TENANT_GROUPS,
            endpoints::TENANTS,
            endpoints::SITES,
            endpoints::VLANS,
            endpoints::PREFIXES,
            endpoints::IP_ADDRESSES,
        ]
        .iter()
        .map(|e| mock.create_calls(e).len())
        .sum();

        let second = run(&mock, &config).await;

        assert_eq!(second.tag, StepOutcome::Existing(first.tag.id().unwrap()));
        assert_eq!(second.tenant, StepOutcome::Existing(first.tenant.id().unwrap()));
        assert_eq!(second.vlan, StepOutcome::Existing(first.vlan.id().unwrap()));
        assert_eq!(second.prefix, StepOutcome::Existing(first.prefix.id().unwrap()));
        assert_eq!(second.addresses.existing, 3);
        assert_eq!(second.addresses.created, 0);

        assert_eq!(mock.tags().len(), 1);
        assert_eq!(mock.tenant_groups().len(), 1);
        assert_eq!(mock.tenants().len(), 1);
        assert_eq!(mock.sites().len(), 1);
        assert_eq!(mock.vlans().len(), 1);
        assert_eq!(mock.prefixes().len(), 1);
        assert_eq!(mock.ip_addresses().len(), 3);
        assert_eq!(calls_after_first, 9);
        assert_eq!(mock.create_calls(endpoints::VLANS).len(), 1);
    }

    #[tokio::test]
    async fn test_existing_vlan_is_reused() {
        let mock = create_test_mock();
        let seeded = seed_vlan(&mock, 100, "legacy-servers").await;
        let config = create_test_config(&[]);

        let report = run(&mock, &config).await;

        assert_eq!(report.vlan, StepOutcome::Existing(seeded.id));
        assert_eq!(mock.vlans().len(), 1);
        // Only the seeding call
        assert_eq!(mock.create_calls(endpoints::VLANS), vec!["100"]);
        assert_eq!(mock.prefixes()[0].vlan.as_ref().map(|v| v.id), Some(seeded.id));
    }

    #[tokio::test]
    async fn test_vlan_failure_skips_prefix_but_not_addresses() {
        let mock = create_test_mock();
        mock.fail_creates(endpoints::VLANS);
        let config = create_test_config(&[]);

        let report = run(&mock, &config).await;

        assert!(matches!(report.vlan, StepOutcome::Failed(_)));
        assert!(matches!(report.prefix, StepOutcome::Skipped(_)));
        assert!(mock.create_calls(endpoints::PREFIXES).is_empty());
        assert!(mock.prefixes().is_empty());

        assert_eq!(report.addresses.created, 3);
        assert!(mock.ip_addresses().iter().all(|ip| ip.vlan.is_none()));
        assert!(!report.is_complete());
    }

    #[tokio::test]
    async fn test_failed_address_does_not_stop_the_range() {
        let mock = create_test_mock();
        mock.fail_create_for(endpoints::IP_ADDRESSES, "10.0.0.2/32");
        let config = create_test_config(&[]);

        let report = run(&mock, &config).await;

        assert_eq!(report.addresses.created, 2);
        assert_eq!(report.addresses.failed, vec!["10.0.0.2/32".to_string()]);
        assert_eq!(
            mock.create_calls(endpoints::IP_ADDRESSES),
            vec!["10.0.0.1/32", "10.0.0.2/32", "10.0.0.3/32"]
        );
        let stored: Vec<String> = mock.ip_addresses().into_iter().map(|ip| ip.address).collect();
        assert_eq!(stored, vec!["10.0.0.1/32", "10.0.0.3/32"]);
    }

    #[tokio::test]
    async fn test_tag_failure_skips_all_later_steps() {
        let mock = create_test_mock();
        mock.fail_creates(endpoints::TAGS);
        let config = create_test_config(&[]);

        let report = run(&mock, &config).await;

        assert!(matches!(report.tag, StepOutcome::Failed(_)));
        assert!(matches!(report.tenant, StepOutcome::Skipped(_)));
        assert!(matches!(report.vlan, StepOutcome::Skipped(_)));
        for endpoint in [
            endpoints::TENANT_GROUPS,
            endpoints::TENANTS,
            endpoints::SITES,
            endpoints::VLANS,
            endpoints::PREFIXES,
            endpoints::IP_ADDRESSES,
        ] {
            assert!(mock.create_calls(endpoint).is_empty(), "{} was called", endpoint);
        }
    }

    #[tokio::test]
    async fn test_tenant_group_failure_creates_ungrouped_tenant() {
        let mock = create_test_mock();
        mock.fail_creates(endpoints::TENANT_GROUPS);
        let config = create_test_config(&[]);

        let report = run(&mock, &config).await;

        assert!(matches!(report.tenant_group, StepOutcome::Failed(_)));
        assert!(matches!(report.tenant, StepOutcome::Created(_)));
        assert!(mock.tenants()[0].group.is_none());
    }

    #[tokio::test]
    async fn test_tenant_failure_leaves_tenant_unset() {
        let mock = create_test_mock();
        mock.fail_creates(endpoints::TENANTS);
        let config = create_test_config(&[]);

        let report = run(&mock, &config).await;

        assert!(matches!(report.tenant, StepOutcome::Failed(_)));
        assert!(mock.vlans()[0].tenant.is_none());
        assert!(mock.prefixes()[0].tenant.is_none());
        assert!(mock.ip_addresses().iter().all(|ip| ip.tenant.is_none()));
    }

    #[tokio::test]
    async fn test_site_failure_leaves_prefix_site_unset() {
        let mock = create_test_mock();
        mock.fail_creates(endpoints::SITES);
        let config = create_test_config(&[]);

        let report = run(&mock, &config).await;

        assert!(matches!(report.site, StepOutcome::Failed(_)));
        assert!(matches!(report.prefix, StepOutcome::Created(_)));
        let prefix = mock.prefixes().remove(0);
        assert!(prefix.site.is_none());
        assert!(prefix.vlan.is_some());
    }

    #[tokio::test]
    async fn test_prefix_status_from_config() {
        let mock = create_test_mock();
        let config = create_test_config(&[(config::PREFIX_STATUS, "reserved")]);

        run(&mock, &config).await;

        assert_eq!(mock.prefixes()[0].status.value, PrefixStatus::Reserved);
    }

    #[tokio::test]
    async fn test_aligned_range_skips_network_and_broadcast() {
        let mock = create_test_mock();
        let config = create_test_config(&[
            (config::IP_START_ADDRESS, "10.0.0.0"),
            (config::IP_END_ADDRESS, "10.0.0.7"),
        ]);

        let report = run(&mock, &config).await;

        assert_eq!(report.addresses.created, 6);
        let calls = mock.create_calls(endpoints::IP_ADDRESSES);
        assert_eq!(calls.first().map(String::as_str), Some("10.0.0.1/32"));
        assert_eq!(calls.last().map(String::as_str), Some("10.0.0.6/32"));
    }
}
