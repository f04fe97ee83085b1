//! Service-provider and schema discovery: `/ServiceProviderConfig`, `/ResourceTypes`, and
//! `/Schemas` (RFC 7644 Section 4), built from `DispatchConfig` and the schema registry
//! rather than a per-tenant configuration table.

use crate::config::DispatchConfig;
use crate::schema::definitions::{
    get_all_schemas, SCIM_SCHEMA_CORE_GROUP, SCIM_SCHEMA_CORE_USER, SCIM_SCHEMA_ENTERPRISE_USER,
};
use serde_json::{json, Value};

pub fn service_provider_config(config: &DispatchConfig) -> Value {
    json!({
        "schemas": ["urn:ietf:params:scim:schemas:core:2.0:ServiceProviderConfig"],
        "patch": {"supported": true},
        "bulk": {"supported": false, "maxOperations": 0, "maxPayloadSize": 0},
        "filter": {"supported": true, "maxResults": config.max_results},
        "changePassword": {"supported": false},
        "sort": {"supported": true},
        "etag": {"supported": true},
        "authenticationSchemes": [
            {
                "name": "OAuth Bearer Token",
                "description": "Authentication using a Bearer token",
                "specUri": "https://tools.ietf.org/html/rfc6750",
                "type": "oauthbearertoken",
                "primary": true,
            }
        ],
        "meta": {"resourceType": "ServiceProviderConfig"},
    })
}

fn resource_type_entries() -> Vec<Value> {
    vec![
        json!({
            "schemas": ["urn:ietf:params:scim:schemas:core:2.0:ResourceType"],
            "id": "User",
            "name": "User",
            "endpoint": "/Users",
            "description": "User Account",
            "schema": SCIM_SCHEMA_CORE_USER,
            "schemaExtensions": [
                {"schema": SCIM_SCHEMA_ENTERPRISE_USER, "required": false}
            ],
            "meta": {"resourceType": "ResourceType", "location": "/ResourceTypes/User"},
        }),
        json!({
            "schemas": ["urn:ietf:params:scim:schemas:core:2.0:ResourceType"],
            "id": "Group",
            "name": "Group",
            "endpoint": "/Groups",
            "description": "Group",
            "schema": SCIM_SCHEMA_CORE_GROUP,
            "schemaExtensions": [],
            "meta": {"resourceType": "ResourceType", "location": "/ResourceTypes/Group"},
        }),
    ]
}

pub fn resource_types() -> Value {
    let entries = resource_type_entries();
    json!({
        "schemas": ["urn:ietf:params:scim:api:messages:2.0:ListResponse"],
        "totalResults": entries.len(),
        "Resources": entries,
    })
}

/// `GET /ResourceTypes/{id}` — `None` if no resource type is registered under that id.
pub fn resource_type_by_id(id: &str) -> Option<Value> {
    resource_type_entries().into_iter().find(|entry| entry["id"] == id)
}

fn schema_entries() -> Vec<Value> {
    get_all_schemas()
        .into_iter()
        .map(|schema| {
            json!({
                "id": schema.id,
                "name": schema.name,
                "description": schema.description,
                "attributes": schema.attributes.iter().map(attribute_to_json).collect::<Vec<_>>(),
                "meta": {"resourceType": "Schema", "location": format!("/Schemas/{}", schema.id)},
            })
        })
        .collect()
}

pub fn schemas() -> Value {
    let schemas = schema_entries();
    json!({
        "schemas": ["urn:ietf:params:scim:api:messages:2.0:ListResponse"],
        "totalResults": schemas.len(),
        "Resources": schemas,
    })
}

/// `GET /Schemas/{id}` — `None` if no schema is registered under that URN.
pub fn schema_by_id(id: &str) -> Option<Value> {
    schema_entries().into_iter().find(|entry| entry["id"] == id)
}

fn attribute_to_json(attr: &crate::schema::definitions::AttributeDefinition) -> Value {
    json!({
        "name": attr.name,
        "type": attr.attr_type,
        "multiValued": attr.multi_valued,
        "description": attr.description,
        "required": attr.required,
        "caseExact": attr.case_exact,
        "mutability": attr.mutability,
        "returned": attr.returned,
        "uniqueness": attr.uniqueness,
        "subAttributes": attr.sub_attributes.iter().map(attribute_to_json).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_provider_config_reflects_max_results() {
        let config = DispatchConfig { max_results: 123, ..DispatchConfig::default() };
        let body = service_provider_config(&config);
        assert_eq!(body["filter"]["maxResults"], 123);
    }

    #[test]
    fn resource_types_lists_user_and_group() {
        let body = resource_types();
        assert_eq!(body["totalResults"], 2);
    }

    #[test]
    fn resource_type_by_id_finds_registered_type_and_misses_unknown() {
        assert!(resource_type_by_id("User").is_some());
        assert!(resource_type_by_id("Widget").is_none());
    }

    #[test]
    fn schema_by_id_finds_registered_schema_and_misses_unknown() {
        assert!(schema_by_id(SCIM_SCHEMA_CORE_USER).is_some());
        assert!(schema_by_id("urn:ietf:params:scim:schemas:core:2.0:Widget").is_none());
    }

    #[test]
    fn schemas_includes_enterprise_extension() {
        let body = schemas();
        let ids: Vec<&str> = body["Resources"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap())
            .collect();
        assert!(ids.contains(&SCIM_SCHEMA_ENTERPRISE_USER));
    }
}
