//! `salesforce_dml_records`: bulk insert, update, delete and upsert

use crate::ports::crm_connection::CrmConnection;
use sfmcp_domain::format::format_dml_results;
use sfmcp_domain::remediation::{ErrorContext, remediate};
use sfmcp_domain::{
    DmlOperation, DmlPlan, ParamKind, RiskLevel, ToolDefinition, ToolError, ToolParameter,
};
use tracing::{debug, warn};

pub const NAME: &str = "salesforce_dml_records";
pub const ALIAS: &str = "dml_records";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Perform data manipulation operations on records:\n\
         - insert: create new records\n\
         - update: modify existing records (identified by Id)\n\
         - delete: remove records (identified by Id)\n\
         - upsert: insert or update based on an external ID field\n\
         Example: operation \"update\", objectName \"Account\", records [{\"Id\": \"001...\", \"Industry\": \"Technology\"}]",
        RiskLevel::High,
    )
    .with_parameter(
        ToolParameter::new("operation", "Type of DML operation to perform", true)
            .with_enum(DmlOperation::ALL.iter().map(|op| op.as_str())),
    )
    .with_parameter(ToolParameter::new("objectName", "API name of the object", true))
    .with_parameter(
        ToolParameter::new(
            "records",
            "Array of records to process (each record must include Id for update and delete)",
            true,
        )
        .with_items(ParamKind::Object),
    )
    .with_parameter(ToolParameter::new(
        "externalIdField",
        "External ID field name for upsert operations",
        false,
    ))
}

pub async fn execute(conn: &dyn CrmConnection, plan: &DmlPlan) -> Result<String, ToolError> {
    let operation = plan.operation();
    let (object_name, outcome) = match plan {
        DmlPlan::Insert {
            object_name,
            records,
        } => (object_name, conn.create(object_name, records).await),
        DmlPlan::Update {
            object_name,
            records,
        } => (object_name, conn.update(object_name, records).await),
        DmlPlan::Delete { object_name, ids } => (object_name, conn.destroy(object_name, ids).await),
        DmlPlan::Upsert {
            object_name,
            records,
            external_id_field,
        } => (
            object_name,
            conn.upsert(object_name, records, external_id_field).await,
        ),
    };

    let results = outcome.map_err(|e| {
        ToolError::upstream(format!(
            "Failed to {} {} records: {}",
            operation,
            object_name,
            remediate(ErrorContext::Dml, &e.to_string())
        ))
    })?;

    let failed = results.iter().filter(|r| !r.success).count();
    if failed > 0 {
        warn!(operation = %operation, object = %object_name, failed, "Some records were rejected");
    } else {
        debug!(operation = %operation, object = %object_name, count = results.len(), "DML completed");
    }
    Ok(format_dml_results(operation, &results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::MockConnection;
    use serde_json::json;
    use sfmcp_domain::{DmlResult, Record, RecordError};

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_mixed_results() {
        let conn = MockConnection::new().with_dml_results(vec![
            DmlResult::ok("001A"),
            DmlResult::failed(vec![
                RecordError::new("Required fields are missing: [Name]")
                    .with_status_code("REQUIRED_FIELD_MISSING")
                    .with_fields(["Name"]),
            ]),
        ]);
        let plan = DmlPlan::Insert {
            object_name: "Account".into(),
            records: vec![record(json!({"Name": "Acme"})), record(json!({}))],
        };

        let text = execute(&conn, &plan).await.unwrap();
        assert!(text.starts_with("INSERT operation completed.\nProcessed 2 records:\n- Successful: 1\n- Failed: 1"));
        assert!(text.contains("Record 2:\n  - Required fields are missing: [Name] [REQUIRED_FIELD_MISSING]\n    Fields: Name"));
        assert_eq!(conn.calls(), vec!["create Account 2"]);
    }

    #[tokio::test]
    async fn test_delete_sends_ids() {
        let conn = MockConnection::new().with_dml_results(vec![DmlResult::ok("001A")]);
        let plan = DmlPlan::Delete {
            object_name: "Account".into(),
            ids: vec!["001A".into()],
        };

        execute(&conn, &plan).await.unwrap();
        assert_eq!(conn.calls(), vec!["destroy Account 001A"]);
    }

    #[tokio::test]
    async fn test_upsert_passes_external_id() {
        let conn = MockConnection::new().with_dml_results(vec![DmlResult::ok("001A")]);
        let plan = DmlPlan::Upsert {
            object_name: "Account".into(),
            records: vec![record(json!({"Ext__c": "A-1"}))],
            external_id_field: "Ext__c".into(),
        };

        let text = execute(&conn, &plan).await.unwrap();
        assert!(text.starts_with("UPSERT operation completed."));
        assert_eq!(conn.calls(), vec!["upsert Account 1 Ext__c"]);
    }

    #[tokio::test]
    async fn test_dml_failure_is_remediated() {
        let conn = MockConnection::new()
            .failing_with("INVALID_CROSS_REFERENCE_KEY", "invalid cross reference id");
        let plan = DmlPlan::Update {
            object_name: "Contact".into(),
            records: vec![record(json!({"Id": "003A", "AccountId": "bad"}))],
        };

        let err = execute(&conn, &plan).await.unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("Failed to update Contact records: "));
        assert!(text.ends_with("Original error: INVALID_CROSS_REFERENCE_KEY: invalid cross reference id"));
    }
}
