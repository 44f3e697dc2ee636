//! EC2 covers the widest spread of resource kinds in the sweep:
//! instances, volumes, snapshots, AMIs and the whole VPC menagerie all
//! tag through the same CreateTags/DescribeTags pair, so discovery is
//! one describe call per kind flattened into a single id list.

use crate::sanitize;
use crate::tags::Tag;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_ec2 as ec2;

pub struct Ec2Service {
    client: ec2::Client,
}

impl Ec2Service {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: ec2::Client::new(config),
        }
    }

    /// Every taggable EC2-family resource id in the region.
    pub async fn list_resources(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();

        let resp = self
            .client
            .describe_snapshots()
            .owner_ids("self")
            .send()
            .await
            .context("DescribeSnapshots failed")?;
        ids.extend(
            resp.snapshots()
                .iter()
                .filter_map(|s| s.snapshot_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_nat_gateways()
            .send()
            .await
            .context("DescribeNatGateways failed")?;
        ids.extend(
            resp.nat_gateways()
                .iter()
                .filter_map(|g| g.nat_gateway_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_customer_gateways()
            .send()
            .await
            .context("DescribeCustomerGateways failed")?;
        ids.extend(
            resp.customer_gateways()
                .iter()
                .filter_map(|g| g.customer_gateway_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_hosts()
            .send()
            .await
            .context("DescribeHosts failed")?;
        ids.extend(
            resp.hosts()
                .iter()
                .filter_map(|h| h.host_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_dhcp_options()
            .send()
            .await
            .context("DescribeDhcpOptions failed")?;
        ids.extend(
            resp.dhcp_options()
                .iter()
                .filter_map(|d| d.dhcp_options_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_egress_only_internet_gateways()
            .send()
            .await
            .context("DescribeEgressOnlyInternetGateways failed")?;
        ids.extend(
            resp.egress_only_internet_gateways()
                .iter()
                .filter_map(|g| g.egress_only_internet_gateway_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_images()
            .owners("self")
            .send()
            .await
            .context("DescribeImages failed")?;
        ids.extend(
            resp.images()
                .iter()
                .filter_map(|i| i.image_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_instances()
            .send()
            .await
            .context("DescribeInstances failed")?;
        for reservation in resp.reservations() {
            ids.extend(
                reservation
                    .instances()
                    .iter()
                    .filter_map(|i| i.instance_id().map(String::from)),
            );
        }

        let resp = self
            .client
            .describe_iam_instance_profile_associations()
            .send()
            .await
            .context("DescribeIamInstanceProfileAssociations failed")?;
        ids.extend(
            resp.iam_instance_profile_associations()
                .iter()
                .filter_map(|a| a.iam_instance_profile())
                .filter_map(|p| p.id().map(String::from)),
        );

        let resp = self
            .client
            .describe_internet_gateways()
            .send()
            .await
            .context("DescribeInternetGateways failed")?;
        ids.extend(
            resp.internet_gateways()
                .iter()
                .filter_map(|g| g.internet_gateway_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_key_pairs()
            .send()
            .await
            .context("DescribeKeyPairs failed")?;
        ids.extend(
            resp.key_pairs()
                .iter()
                .filter_map(|k| k.key_name().map(String::from)),
        );

        let resp = self
            .client
            .describe_launch_templates()
            .send()
            .await
            .context("DescribeLaunchTemplates failed")?;
        ids.extend(
            resp.launch_templates()
                .iter()
                .filter_map(|t| t.launch_template_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_network_acls()
            .send()
            .await
            .context("DescribeNetworkAcls failed")?;
        ids.extend(
            resp.network_acls()
                .iter()
                .filter_map(|a| a.network_acl_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_network_interfaces()
            .send()
            .await
            .context("DescribeNetworkInterfaces failed")?;
        ids.extend(
            resp.network_interfaces()
                .iter()
                .filter_map(|n| n.network_interface_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_placement_groups()
            .send()
            .await
            .context("DescribePlacementGroups failed")?;
        ids.extend(
            resp.placement_groups()
                .iter()
                .filter_map(|g| g.group_name().map(String::from)),
        );

        let resp = self
            .client
            .describe_reserved_instances()
            .send()
            .await
            .context("DescribeReservedInstances failed")?;
        ids.extend(
            resp.reserved_instances()
                .iter()
                .filter_map(|r| r.reserved_instances_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_route_tables()
            .send()
            .await
            .context("DescribeRouteTables failed")?;
        ids.extend(
            resp.route_tables()
                .iter()
                .filter_map(|t| t.route_table_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_security_groups()
            .send()
            .await
            .context("DescribeSecurityGroups failed")?;
        ids.extend(
            resp.security_groups()
                .iter()
                .filter_map(|g| g.group_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_spot_instance_requests()
            .send()
            .await
            .context("DescribeSpotInstanceRequests failed")?;
        ids.extend(
            resp.spot_instance_requests()
                .iter()
                .filter_map(|r| r.spot_instance_request_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_subnets()
            .send()
            .await
            .context("DescribeSubnets failed")?;
        ids.extend(
            resp.subnets()
                .iter()
                .filter_map(|s| s.subnet_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_volumes()
            .send()
            .await
            .context("DescribeVolumes failed")?;
        ids.extend(
            resp.volumes()
                .iter()
                .filter_map(|v| v.volume_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_vpcs()
            .send()
            .await
            .context("DescribeVpcs failed")?;
        ids.extend(
            resp.vpcs()
                .iter()
                .filter_map(|v| v.vpc_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_vpc_peering_connections()
            .send()
            .await
            .context("DescribeVpcPeeringConnections failed")?;
        ids.extend(
            resp.vpc_peering_connections()
                .iter()
                .filter_map(|c| c.vpc_peering_connection_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_vpn_connections()
            .send()
            .await
            .context("DescribeVpnConnections failed")?;
        ids.extend(
            resp.vpn_connections()
                .iter()
                .filter_map(|c| c.vpn_connection_id().map(String::from)),
        );

        let resp = self
            .client
            .describe_vpn_gateways()
            .send()
            .await
            .context("DescribeVpnGateways failed")?;
        ids.extend(
            resp.vpn_gateways()
                .iter()
                .filter_map(|g| g.vpn_gateway_id().map(String::from)),
        );

        Ok(ids)
    }

    /// Tags for one resource via DescribeTags with a resource-id filter.
    pub async fn list_tags(&self, resource_id: &str) -> Result<Vec<Tag>> {
        let id = sanitize::last_path_segment(resource_id);
        let resp = self
            .client
            .describe_tags()
            .filters(
                ec2::types::Filter::builder()
                    .name("resource-id")
                    .values(&id)
                    .build(),
            )
            .send()
            .await
            .with_context(|| format!("DescribeTags failed for {}", id))?;

        Ok(resp
            .tags()
            .iter()
            .filter_map(|t| match (t.key(), t.value()) {
                (Some(k), Some(v)) => Some(Tag::new(k, v)),
                _ => None,
            })
            .collect())
    }

    /// CreateTags overwrites an existing key, which is exactly the
    /// overwrite semantics the backfill wants.
    pub async fn put_tag(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        let id = sanitize::last_path_segment(resource_id);
        self.client
            .create_tags()
            .resources(&id)
            .tags(ec2::types::Tag::builder().key(key).value(value).build())
            .send()
            .await
            .with_context(|| format!("CreateTags failed for {}", id))?;
        Ok(())
    }
}
