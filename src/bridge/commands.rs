//! Typed thin callers for the observed command surface.
//!
//! Each method builds the wire parameters for one host command and delegates
//! to [`BridgeClient::call`]. None of them interpret the returned envelope;
//! the command handlers live host-side and remain opaque to this crate.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::bridge::client::{BridgeClient, BridgeError};
use crate::models::{
    CreateBlueprintEventParams, CreateBlueprintParams, CreateMaterialParams, CreateObjectParams,
    ExecutePythonParams, GetBlueprintInfoParams, GetMaterialInfoParams, ModifyBlueprintParams,
    ModifyMaterialParams, ModifyObjectParams,
};
use crate::protocol::ResponseEnvelope;

/// Serialize a typed parameter struct into the wire parameter map.
fn to_params<T: Serialize>(params: &T) -> Result<Map<String, Value>, BridgeError> {
    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(BridgeError::InvalidRequest(format!(
            "parameters must form a JSON object, got: {other}"
        ))),
        Err(e) => Err(BridgeError::InvalidRequest(format!(
            "failed to serialize parameters: {e}"
        ))),
    }
}

impl BridgeClient {
    /// Fetch information about the current scene (level name, actors).
    pub async fn get_scene_info(&self) -> Result<ResponseEnvelope, BridgeError> {
        self.call("get_scene_info", None).await
    }

    /// Spawn a new actor in the scene.
    pub async fn create_object(
        &self,
        params: CreateObjectParams,
    ) -> Result<ResponseEnvelope, BridgeError> {
        self.call("create_object", Some(to_params(&params)?)).await
    }

    /// Change the transform of an existing actor.
    pub async fn modify_object(
        &self,
        params: ModifyObjectParams,
    ) -> Result<ResponseEnvelope, BridgeError> {
        self.call("modify_object", Some(to_params(&params)?)).await
    }

    /// Remove an actor from the scene by name.
    pub async fn delete_object(&self, name: &str) -> Result<ResponseEnvelope, BridgeError> {
        let mut params = Map::new();
        params.insert("name".to_string(), Value::String(name.to_string()));
        self.call("delete_object", Some(params)).await
    }

    /// Run Python inside the host editor process.
    ///
    /// Validates the code/file exclusivity locally and fails with
    /// [`BridgeError::InvalidRequest`] before any network traffic when it is
    /// violated. On a host-side partial failure the envelope carries both
    /// the captured output and the error text; deserialize its `result` into
    /// [`PythonOutput`](crate::models::PythonOutput).
    pub async fn execute_python(
        &self,
        params: ExecutePythonParams,
    ) -> Result<ResponseEnvelope, BridgeError> {
        params.validate().map_err(BridgeError::InvalidRequest)?;
        self.call("execute_python", Some(to_params(&params)?)).await
    }

    /// Create a material asset under the given package path.
    pub async fn create_material(
        &self,
        params: CreateMaterialParams,
    ) -> Result<ResponseEnvelope, BridgeError> {
        self.call("create_material", Some(to_params(&params)?)).await
    }

    /// Update properties on an existing material.
    pub async fn modify_material(
        &self,
        params: ModifyMaterialParams,
    ) -> Result<ResponseEnvelope, BridgeError> {
        self.call("modify_material", Some(to_params(&params)?)).await
    }

    /// Fetch the properties of a material asset.
    pub async fn get_material_info(&self, path: &str) -> Result<ResponseEnvelope, BridgeError> {
        let params = GetMaterialInfoParams {
            path: path.to_string(),
        };
        self.call("get_material_info", Some(to_params(&params)?)).await
    }

    /// Create a blueprint asset under the given package path.
    pub async fn create_blueprint(
        &self,
        params: CreateBlueprintParams,
    ) -> Result<ResponseEnvelope, BridgeError> {
        self.call("create_blueprint", Some(to_params(&params)?)).await
    }

    /// Fetch structure and event information for a blueprint.
    pub async fn get_blueprint_info(
        &self,
        blueprint_path: &str,
    ) -> Result<ResponseEnvelope, BridgeError> {
        let params = GetBlueprintInfoParams {
            blueprint_path: blueprint_path.to_string(),
        };
        self.call("get_blueprint_info", Some(to_params(&params)?)).await
    }

    /// Add a named event to a blueprint's event graph.
    pub async fn create_blueprint_event(
        &self,
        blueprint_path: &str,
        event_name: &str,
    ) -> Result<ResponseEnvelope, BridgeError> {
        let params = CreateBlueprintEventParams {
            blueprint_path: blueprint_path.to_string(),
            event_name: event_name.to_string(),
        };
        self.call("create_blueprint_event", Some(to_params(&params)?))
            .await
    }

    /// Update properties on an existing blueprint.
    pub async fn modify_blueprint(
        &self,
        params: ModifyBlueprintParams,
    ) -> Result<ResponseEnvelope, BridgeError> {
        self.call("modify_blueprint", Some(to_params(&params)?)).await
    }
}
