use std::marker::PhantomData;

use poem::{Request, RequestBody};
use poem_openapi::payload::{Json, Payload};
use poem_openapi::registry::{MetaMediaType, MetaRequest, Registry};
use poem_openapi::types::Type;
use poem_openapi::{ApiExtractor, ApiExtractorType, ExtractParamOptions};
use serde_json::{Map, Value};

use business::domain::cart::value_objects::RawParam;

/// JSON request body read field by field.
///
/// A missing body, a missing content type or a body that is not a JSON
/// object all yield an empty parameter set, so the request still reaches the
/// use case and its availability check. `T` only documents the body shape in
/// the OpenAPI document.
pub struct CartParams<T> {
    fields: Map<String, Value>,
    _shape: PhantomData<T>,
}

impl<T> CartParams<T> {
    pub fn from_slice(bytes: &[u8]) -> Self {
        let fields = match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(fields)) => fields,
            _ => Map::new(),
        };

        Self {
            fields,
            _shape: PhantomData,
        }
    }

    pub fn param(&self, name: &str) -> RawParam {
        coerce(self.fields.get(name))
    }
}

/// Numbers and numeric strings are accepted; empty values read as absent.
fn coerce(value: Option<&Value>) -> RawParam {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => RawParam::Absent,
        Some(Value::Number(number)) => number
            .as_i64()
            .map_or(RawParam::Malformed, RawParam::Integer),
        Some(Value::String(text)) => {
            let text = text.trim();
            if text.is_empty() {
                RawParam::Absent
            } else {
                text.parse::<i64>()
                    .map_or(RawParam::Malformed, RawParam::Integer)
            }
        }
        Some(_) => RawParam::Malformed,
    }
}

impl<'a, T: Type> ApiExtractor<'a> for CartParams<T> {
    const TYPES: &'static [ApiExtractorType] = &[ApiExtractorType::RequestObject];

    type ParamType = ();
    type ParamRawType = ();

    fn register(registry: &mut Registry) {
        <Json<T> as Payload>::register(registry);
    }

    fn request_meta() -> Option<MetaRequest> {
        Some(MetaRequest {
            description: None,
            content: vec![MetaMediaType {
                content_type: <Json<T> as Payload>::CONTENT_TYPE,
                schema: <Json<T> as Payload>::schema_ref(),
            }],
            required: false,
        })
    }

    async fn from_request(
        _request: &'a Request,
        body: &mut RequestBody,
        _param_opts: ExtractParamOptions<Self::ParamType>,
    ) -> poem::Result<Self> {
        let bytes = body.take()?.into_bytes().await?;
        Ok(Self::from_slice(&bytes))
    }
}
