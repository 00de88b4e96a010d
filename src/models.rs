//! Typed parameters and results for the editor command surface.
//!
//! These structs mirror the JSON shapes the host command server accepts.
//! Field names match the wire exactly; optional fields are omitted from the
//! encoded request when unset, matching what the historical clients sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 3-component vector, `[x, y, z]` on the wire.
///
/// Used for locations and scales; rotations reuse the same shape as
/// `[pitch, yaw, roll]`.
pub type Vec3 = [f64; 3];

/// Parameters for `create_object`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateObjectParams {
    /// Actor class to spawn, e.g. `StaticMeshActor` or `PointLight`.
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CreateObjectParams {
    pub fn new(object_type: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            location: None,
            label: None,
        }
    }

    pub fn at(mut self, location: Vec3) -> Self {
        self.location = Some(location);
        self
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Parameters for `modify_object`. Only the transform components that are
/// set get sent; the host leaves the rest untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyObjectParams {
    /// Name of the actor to modify.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
}

impl ModifyObjectParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
            rotation: None,
            scale: None,
        }
    }
}

/// Parameters for `execute_python`.
///
/// The host accepts either inline `code` or a path to a script `file`, never
/// both. The struct keeps both fields optional to match the wire shape, and
/// [`validate`](Self::validate) enforces the exclusivity locally so a bad
/// combination never reaches the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutePythonParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl ExecutePythonParams {
    /// Run inline Python source.
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            file: None,
        }
    }

    /// Run a Python script file resolvable by the host process.
    pub fn file(file: impl Into<String>) -> Self {
        Self {
            code: None,
            file: Some(file.into()),
        }
    }

    /// Check the code/file exclusivity invariant.
    pub fn validate(&self) -> Result<(), String> {
        match (&self.code, &self.file) {
            (None, None) => Err("must provide either 'code' or 'file'".to_string()),
            (Some(_), Some(_)) => Err("provide either 'code' or 'file', not both".to_string()),
            _ => Ok(()),
        }
    }
}

/// `result` payload of an `execute_python` response.
///
/// On success only `output` is present. On a partial failure the host still
/// reports the captured `output` together with an opaque `error` string
/// (free text; no traceback structure is guaranteed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PythonOutput {
    #[serde(default)]
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Parameters for `create_material`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMaterialParams {
    /// Content-browser package path, e.g. `/Game/Materials`.
    pub package_path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

/// Parameters for `modify_material`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyMaterialParams {
    /// Full asset path of the material to modify.
    pub path: String,
    pub properties: Map<String, Value>,
}

/// Parameters for `get_material_info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMaterialInfoParams {
    pub path: String,
}

/// Parameters for `create_blueprint`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBlueprintParams {
    /// Content-browser package path, e.g. `/Game/Blueprints`.
    pub package_path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

/// Parameters for `get_blueprint_info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetBlueprintInfoParams {
    pub blueprint_path: String,
}

/// Parameters for `create_blueprint_event`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBlueprintEventParams {
    pub blueprint_path: String,
    pub event_name: String,
}

/// Parameters for `modify_blueprint`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyBlueprintParams {
    pub blueprint_path: String,
    pub properties: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_create_object_omits_unset_fields() {
        let params = CreateObjectParams::new("StaticMeshActor");
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, json!({"type": "StaticMeshActor"}));
    }

    #[test]
    fn test_create_object_full() {
        let params = CreateObjectParams::new("PointLight")
            .at([0.0, 100.0, 50.0])
            .labeled("KeyLight");
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({"type": "PointLight", "location": [0.0, 100.0, 50.0], "label": "KeyLight"})
        );
    }

    #[test]
    fn test_modify_object_partial_transform() {
        let mut params = ModifyObjectParams::new("Cube_1");
        params.rotation = Some([0.0, 90.0, 0.0]);
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, json!({"name": "Cube_1", "rotation": [0.0, 90.0, 0.0]}));
    }

    #[test]
    fn test_execute_python_validation() {
        assert!(ExecutePythonParams::code("print('hi')").validate().is_ok());
        assert!(ExecutePythonParams::file("/tmp/script.py").validate().is_ok());

        let neither = ExecutePythonParams {
            code: None,
            file: None,
        };
        assert!(neither.validate().is_err());

        let both = ExecutePythonParams {
            code: Some("print('hi')".to_string()),
            file: Some("/tmp/script.py".to_string()),
        };
        let err = both.validate().unwrap_err();
        assert!(err.contains("not both"), "unexpected message: {err}");
    }

    #[test]
    fn test_python_output_partial_failure() {
        let output: PythonOutput =
            serde_json::from_value(json!({"output": "step 1 ok\n", "error": "NameError: x"}))
                .unwrap();
        assert_eq!(output.output, "step 1 ok\n");
        assert_eq!(output.error.as_deref(), Some("NameError: x"));

        let success: PythonOutput = serde_json::from_value(json!({"output": "done"})).unwrap();
        assert_eq!(success.error, None);
    }
}
