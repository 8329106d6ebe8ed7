//! Renders a topology as a CloudFormation-style JSON template.
//!
//! This is a pure function of the topology: the same graph always yields
//! byte-identical output, since every map keeps insertion order and the
//! graph itself iterates in a fixed order.

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::error::{Result, SynthError};
use super::logical::logical_id;
use crate::compute::FunctionDescriptor;
use crate::routing::{HttpMethod, Integration, MockIntegration, RouteNode};
use crate::topology::{validate, Topology};

/// Template format version understood by the provisioning engine.
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// Parameter naming the bucket that holds bundled function code.
pub const ASSET_BUCKET_PARAMETER: &str = "AssetBucket";

const BASIC_EXECUTION_POLICY: &str = ":iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";

/// A synthesized template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    pub description: String,
    pub parameters: Map<String, Value>,
    pub resources: Map<String, Value>,
    pub outputs: Map<String, Value>,
}

impl Template {
    /// Resources whose `Type` equals `resource_type`.
    pub fn resources_of_type(&self, resource_type: &str) -> Vec<(&String, &Value)> {
        self.resources
            .iter()
            .filter(|(_, resource)| resource["Type"] == resource_type)
            .collect()
    }

    /// Number of resources of `resource_type`.
    pub fn count(&self, resource_type: &str) -> usize {
        self.resources_of_type(resource_type).len()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Validates `topology` and renders it as a template.
///
/// Fails with [`SynthError::DuplicateLogicalId`] when two resources would
/// share a logical id, since the later one would silently replace the first.
pub fn synthesize(topology: &Topology) -> Result<Template> {
    validate(topology)?;

    let table_id = logical_id(&[&topology.table.logical_id, "table"]);
    let api_id = logical_id(&[&topology.api.logical_id]);
    let deployment_id = logical_id(&[&api_id, "deployment"]);
    let stage_id = logical_id(&[&api_id, "deployment", "stage", &topology.api.stage_name]);

    let mut emitter = Emitter {
        resources: Map::new(),
        method_ids: Vec::new(),
        api_id: api_id.clone(),
        stage_id: stage_id.clone(),
    };

    emitter.emit_table(topology, &table_id)?;
    for function in &topology.functions {
        emitter.emit_function(topology, function, &table_id)?;
    }

    emitter.insert(
        api_id.clone(),
        json!({
            "Type": "AWS::ApiGateway::RestApi",
            "Properties": { "Name": topology.api.name }
        }),
    )?;
    for node in &topology.api.resources {
        emitter.emit_route(
            node,
            json!({ "Fn::GetAtt": [api_id, "RootResourceId"] }),
            &api_id,
            "/",
        )?;
    }

    let method_ids = std::mem::take(&mut emitter.method_ids);
    emitter.insert(
        deployment_id.clone(),
        json!({
            "Type": "AWS::ApiGateway::Deployment",
            "Properties": {
                "RestApiId": { "Ref": api_id },
                "Description": format!("Deployment of {}", topology.api.name)
            },
            "DependsOn": method_ids
        }),
    )?;
    emitter.insert(
        stage_id.clone(),
        json!({
            "Type": "AWS::ApiGateway::Stage",
            "Properties": {
                "RestApiId": { "Ref": api_id },
                "DeploymentId": { "Ref": deployment_id },
                "StageName": topology.api.stage_name
            }
        }),
    )?;

    let mut parameters = Map::new();
    parameters.insert(
        ASSET_BUCKET_PARAMETER.to_string(),
        json!({
            "Type": "String",
            "Description": "Bucket holding the bundled function code"
        }),
    );

    let mut outputs = Map::new();
    outputs.insert(
        logical_id(&[&api_id, "endpoint"]),
        json!({
            "Description": "Base URL of the deployed stage",
            "Value": {
                "Fn::Join": ["", [
                    "https://",
                    { "Ref": api_id },
                    ".execute-api.",
                    { "Ref": "AWS::Region" },
                    ".",
                    { "Ref": "AWS::URLSuffix" },
                    "/",
                    { "Ref": stage_id },
                    "/"
                ]]
            }
        }),
    );
    outputs.insert(
        "TableName".to_string(),
        json!({
            "Description": "Name of the items table",
            "Value": { "Ref": table_id }
        }),
    );

    Ok(Template {
        format_version: TEMPLATE_FORMAT_VERSION.to_string(),
        description: format!(
            "{}: REST API {} backed by {} functions and table {}",
            topology.stack_name,
            topology.api.name,
            topology.functions.len(),
            topology.table.table_name
        ),
        parameters,
        resources: emitter.resources,
        outputs,
    })
}

struct Emitter {
    resources: Map<String, Value>,
    method_ids: Vec<String>,
    api_id: String,
    stage_id: String,
}

impl Emitter {
    /// Adds a resource, refusing to replace one with the same logical id.
    fn insert(&mut self, logical_id: String, resource: Value) -> Result<()> {
        if self.resources.contains_key(&logical_id) {
            return Err(SynthError::DuplicateLogicalId(logical_id));
        }
        self.resources.insert(logical_id, resource);
        Ok(())
    }

    fn emit_table(&mut self, topology: &Topology, table_id: &str) -> Result<()> {
        let table = &topology.table;
        let mut properties = Map::new();
        properties.insert("TableName".to_string(), json!(table.table_name));
        properties.insert(
            "KeySchema".to_string(),
            json!([{ "AttributeName": table.key_name(), "KeyType": "HASH" }]),
        );
        properties.insert(
            "AttributeDefinitions".to_string(),
            json!([{
                "AttributeName": table.key_name(),
                "AttributeType": table.partition_key.attribute_type.code()
            }]),
        );
        properties.insert(
            "BillingMode".to_string(),
            json!(table.billing_mode.as_str()),
        );
        if let crate::storage::BillingMode::Provisioned {
            read_capacity,
            write_capacity,
        } = table.billing_mode
        {
            properties.insert(
                "ProvisionedThroughput".to_string(),
                json!({
                    "ReadCapacityUnits": read_capacity,
                    "WriteCapacityUnits": write_capacity
                }),
            );
        }

        let policy = table.removal_policy.deletion_policy();
        self.insert(
            table_id.to_string(),
            json!({
                "Type": "AWS::DynamoDB::Table",
                "Properties": properties,
                "UpdateReplacePolicy": policy,
                "DeletionPolicy": policy
            }),
        )
    }

    fn emit_function(
        &mut self,
        topology: &Topology,
        function: &FunctionDescriptor,
        table_id: &str,
    ) -> Result<()> {
        let function_id = logical_id(&[&function.logical_id]);
        let role_id = logical_id(&[&function.logical_id, "service", "role"]);
        let policy_id = logical_id(&[&function.logical_id, "service", "role", "default", "policy"]);

        self.insert(
            role_id.clone(),
            json!({
                "Type": "AWS::IAM::Role",
                "Properties": {
                    "AssumeRolePolicyDocument": {
                        "Version": "2012-10-17",
                        "Statement": [{
                            "Action": "sts:AssumeRole",
                            "Effect": "Allow",
                            "Principal": { "Service": "lambda.amazonaws.com" }
                        }]
                    },
                    "ManagedPolicyArns": [{
                        "Fn::Join": ["", ["arn:", { "Ref": "AWS::Partition" }, BASIC_EXECUTION_POLICY]]
                    }]
                }
            }),
        )?;

        let statements: Vec<Value> = topology
            .grants_for(&function.logical_id)
            .into_iter()
            .map(|grant| {
                json!({
                    "Action": grant.access.actions(),
                    "Effect": "Allow",
                    "Resource": [{ "Fn::GetAtt": [table_id, "Arn"] }]
                })
            })
            .collect();
        self.insert(
            policy_id.clone(),
            json!({
                "Type": "AWS::IAM::Policy",
                "Properties": {
                    "PolicyName": policy_id,
                    "PolicyDocument": { "Version": "2012-10-17", "Statement": statements },
                    "Roles": [{ "Ref": role_id }]
                }
            }),
        )?;

        let bundling = &function.bundling;
        self.insert(
            function_id.clone(),
            json!({
                "Type": "AWS::Lambda::Function",
                "Properties": {
                    "Code": {
                        "S3Bucket": { "Ref": ASSET_BUCKET_PARAMETER },
                        "S3Key": format!("{}.zip", function.logical_id)
                    },
                    "Handler": format!("index.{}", function.handler),
                    "Runtime": function.runtime.identifier(),
                    "MemorySize": function.memory_size_mb,
                    "Timeout": function.timeout_secs,
                    "Role": { "Fn::GetAtt": [role_id, "Arn"] },
                    "Environment": { "Variables": function.environment }
                },
                "DependsOn": [policy_id, role_id],
                "Metadata": {
                    "Entry": function.entry,
                    "Bundling": {
                        "ExternalModules": bundling.external_modules,
                        "DepsLockFilePath": bundling.deps_lock_file_path,
                        "Minify": bundling.minify,
                        "SourceMap": bundling.source_map
                    }
                }
            }),
        )
    }

    fn emit_route(
        &mut self,
        node: &RouteNode,
        parent: Value,
        id_base: &str,
        parent_path: &str,
    ) -> Result<()> {
        let resource_id = logical_id(&[id_base, &node.path_part]);
        let path = format!("{}/{}", parent_path.trim_end_matches('/'), node.path_part);

        self.insert(
            resource_id.clone(),
            json!({
                "Type": "AWS::ApiGateway::Resource",
                "Properties": {
                    "ParentId": parent,
                    "PathPart": node.path_part,
                    "RestApiId": { "Ref": self.api_id }
                }
            }),
        )?;

        for (method, integration) in &node.methods {
            let method_id = format!("{}{}", resource_id, method.as_str());
            let mut properties = Map::new();
            properties.insert("AuthorizationType".to_string(), json!("NONE"));
            properties.insert("HttpMethod".to_string(), json!(method.as_str()));
            properties.insert("ResourceId".to_string(), json!({ "Ref": resource_id }));
            properties.insert("RestApiId".to_string(), json!({ "Ref": self.api_id }));

            match integration {
                Integration::Function { function_id } => {
                    let function_ref = logical_id(&[function_id]);
                    properties.insert(
                        "Integration".to_string(),
                        json!({
                            "Type": "AWS_PROXY",
                            "IntegrationHttpMethod": "POST",
                            "Uri": {
                                "Fn::Join": ["", [
                                    "arn:",
                                    { "Ref": "AWS::Partition" },
                                    ":apigateway:",
                                    { "Ref": "AWS::Region" },
                                    ":lambda:path/2015-03-31/functions/",
                                    { "Fn::GetAtt": [function_ref, "Arn"] },
                                    "/invocations"
                                ]]
                            }
                        }),
                    );
                    self.emit_invoke_permission(&method_id, &function_ref, *method, &path)?;
                }
                Integration::Mock(mock) => {
                    let (integration, method_responses) = mock_integration(mock);
                    properties.insert("Integration".to_string(), integration);
                    properties.insert("MethodResponses".to_string(), method_responses);
                }
            }

            self.insert(
                method_id.clone(),
                json!({ "Type": "AWS::ApiGateway::Method", "Properties": properties }),
            )?;
            self.method_ids.push(method_id);
        }

        for child in &node.children {
            self.emit_route(child, json!({ "Ref": resource_id }), &resource_id, &path)?;
        }
        Ok(())
    }

    fn emit_invoke_permission(
        &mut self,
        method_id: &str,
        function_ref: &str,
        method: HttpMethod,
        path: &str,
    ) -> Result<()> {
        self.insert(
            format!("{}Permission", method_id),
            json!({
                "Type": "AWS::Lambda::Permission",
                "Properties": {
                    "Action": "lambda:InvokeFunction",
                    "FunctionName": { "Fn::GetAtt": [function_ref, "Arn"] },
                    "Principal": "apigateway.amazonaws.com",
                    "SourceArn": {
                        "Fn::Join": ["", [
                            "arn:",
                            { "Ref": "AWS::Partition" },
                            ":execute-api:",
                            { "Ref": "AWS::Region" },
                            ":",
                            { "Ref": "AWS::AccountId" },
                            ":",
                            { "Ref": self.api_id },
                            "/",
                            { "Ref": self.stage_id },
                            "/",
                            method.as_str(),
                            execute_api_path(path)
                        ]]
                    }
                }
            }),
        )
    }
}

/// Integration and method-response blocks for a static response.
fn mock_integration(mock: &MockIntegration) -> (Value, Value) {
    let mut integration_parameters = Map::new();
    let mut method_parameters = Map::new();
    for (header, value) in &mock.response_headers {
        // Gateway response parameters take quoted literals.
        integration_parameters.insert(header.response_parameter(), json!(format!("'{}'", value)));
        method_parameters.insert(header.response_parameter(), json!(true));
    }
    let status = mock.status_code.to_string();

    let integration = json!({
        "Type": "MOCK",
        "PassthroughBehavior": mock.passthrough.as_str(),
        "RequestTemplates": { "application/json": mock.request_template },
        "IntegrationResponses": [{
            "StatusCode": status,
            "ResponseParameters": integration_parameters
        }]
    });
    let method_responses = json!([{
        "StatusCode": status,
        "ResponseParameters": method_parameters
    }]);
    (integration, method_responses)
}

/// Path as it appears in an execute-api ARN: `{param}` segments become `*`.
fn execute_api_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.starts_with('{') && segment.ends_with('}') {
                "*"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
