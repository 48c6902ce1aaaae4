//! Tooling API shapes: anonymous Apex results and custom field metadata.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of executing an anonymous Apex body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteAnonymousResult {
    #[serde(default)]
    pub line: i64,
    #[serde(default)]
    pub column: i64,
    pub compiled: bool,
    pub success: bool,
    #[serde(default)]
    pub compile_problem: Option<String>,
    #[serde(default)]
    pub exception_message: Option<String>,
    #[serde(default)]
    pub exception_stack_trace: Option<String>,
}

/// A custom field definition for the Tooling API `CustomField` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CustomField {
    /// the full name of the field, which is formatted as `sobjectName.fieldname__c`.
    /// For example, `Account.Name__c` or `My_Custom_Object__c.First_Name__c`.
    #[serde(rename = "FullName")]
    pub full_name: String,

    #[serde(rename = "Metadata")]
    pub metadata: CustomFieldMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldMetadata {
    /// field type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// the description of the field
    pub description: String,

    /// the inline text of the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_help_text: Option<String>,

    /// the label of the field
    pub label: String,

    /// the field length of the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 131072))]
    pub length: Option<u32>,

    /// if it is required or not
    pub required: bool,
}

/// Field types accepted when creating a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FieldType {
    Address,
    AutoNumber,
    Lookup,
    MasterDetail,
    MetadataRelationship,
    Checkbox,
    Currency,
    Date,
    DateTime,
    Email,
    EncryptedText,
    Note,
    ExternalLookup,
    IndirectLookup,
    Number,
    Percent,
    Phone,
    Picklist,
    MultiselectPicklist,
    Summary,
    Text,
    TextArea,
    LongTextArea,
    Url,
    Hierarchy,
    File,
    Html,
    Location,
    Time,
}
