//! Outbound request construction.
//!
//! Builds a [`RequestSpec`] from a method, path, parameters and optional
//! body, applying the service's parameter-placement and encoding rules:
//! GET/HEAD/DELETE parameters become a URL query string, POST/PUT
//! parameters become a JSON body, and when an explicit body is present
//! the parameters always go to the query string with the body as the
//! payload.

use geocore_domain::{GeocoreError, GeocoreResult};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use rand::Rng;
use serde_json::{Map, Value};

use crate::ports::{HttpMethod, RequestSpec};

/// Header carrying the session token.
pub const ACCESS_TOKEN_HEADER: &str = "Geocore-Access-Token";

/// Characters percent-escaped in query keys and values. The set is part
/// of the wire contract and must not drift.
const QUERY_RESERVED: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b':')
    .add(b'&')
    .add(b'=')
    .add(b';')
    .add(b'+')
    .add(b'!')
    .add(b'@')
    .add(b'#')
    .add(b'$')
    .add(b'(')
    .add(b')')
    .add(b'\'')
    .add(b',')
    .add(b'*');

/// Request parameters: a JSON object whose values may be scalars, one
/// level of nested objects, or arrays.
pub type Params = Map<String, Value>;

/// Request payload accompanying POST requests.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// JSON object payload.
    Json(Params),
    /// Single-file multipart payload.
    Multipart(FileUpload),
}

/// A file to upload as multipart form data.
///
/// The three metadata fields are all required for dispatch; a spec with
/// file bytes but incomplete metadata is rejected by the builder before
/// any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    contents: Vec<u8>,
    field_name: Option<String>,
    file_name: Option<String>,
    mime_type: Option<String>,
}

impl FileUpload {
    /// Starts an upload spec from raw file bytes.
    #[must_use]
    pub const fn new(contents: Vec<u8>) -> Self {
        Self {
            contents,
            field_name: None,
            file_name: None,
            mime_type: None,
        }
    }

    /// Sets the form field name.
    #[must_use]
    pub fn field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Sets the file name reported to the server.
    #[must_use]
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Sets the MIME type of the file contents.
    #[must_use]
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    fn validate(&self) -> GeocoreResult<ValidUpload<'_>> {
        match (&self.field_name, &self.file_name, &self.mime_type) {
            (Some(field_name), Some(file_name), Some(mime_type)) => Ok(ValidUpload {
                contents: &self.contents,
                field_name,
                file_name,
                mime_type,
            }),
            _ => Err(GeocoreError::invalid_parameter(
                "multipart upload requires a field name, a file name and a MIME type",
            )),
        }
    }
}

/// A fully specified upload, borrowed from a validated [`FileUpload`].
struct ValidUpload<'a> {
    contents: &'a [u8],
    field_name: &'a str,
    file_name: &'a str,
    mime_type: &'a str,
}

fn escape(text: &str) -> String {
    utf8_percent_encode(text, QUERY_RESERVED).to_string()
}

/// Textual form of a scalar query value. Strings are used verbatim,
/// everything else through its JSON rendering.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn query_components(key: &str, value: &Value, components: &mut Vec<(String, String)>) {
    match value {
        Value::Object(nested) => {
            let mut nested_keys: Vec<&String> = nested.keys().collect();
            nested_keys.sort();
            for nested_key in nested_keys {
                query_components(
                    &format!("{key}[{nested_key}]"),
                    &nested[nested_key.as_str()],
                    components,
                );
            }
        }
        Value::Array(items) => {
            for item in items {
                query_components(&format!("{key}[]"), item, components);
            }
        }
        other => components.push((escape(key), escape(&scalar(other)))),
    }
}

/// Encodes parameters as a query string.
///
/// Keys are sorted lexicographically, so identical parameter maps always
/// serialize to the same string regardless of insertion order. Nested
/// objects flatten to `key[nested]` and arrays to `key[]`.
#[must_use]
pub fn query_string(params: &Params) -> String {
    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort();
    let mut components = Vec::new();
    for key in keys {
        query_components(key, &params[key.as_str()], &mut components);
    }
    components
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn generate_boundary() -> String {
    let mut rng = rand::rng();
    format!(
        "Boundary+{:08X}{:08X}",
        rng.random::<u32>(),
        rng.random::<u32>()
    )
}

fn multipart_payload(upload: &ValidUpload<'_>, boundary: &str) -> Vec<u8> {
    let mut body = Vec::with_capacity(upload.contents.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            upload.field_name, upload.file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", upload.mime_type).as_bytes());
    body.extend_from_slice(upload.contents);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

fn append_query(url: &mut String, query: &str) {
    if query.is_empty() {
        return;
    }
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(query);
}

fn json_bytes(map: &Params) -> GeocoreResult<Vec<u8>> {
    serde_json::to_vec(map).map_err(|error| GeocoreError::InvalidState {
        message: format!("failed to serialize request body: {error}"),
    })
}

/// Builds a fully formed request for the given operation.
///
/// # Errors
///
/// Returns `InvalidParameter` when a multipart body is only partially
/// specified; no network call is made in that case.
pub(crate) fn build_request(
    method: HttpMethod,
    base_url: &str,
    path: &str,
    params: Option<&Params>,
    body: Option<&Body>,
    token: Option<&str>,
) -> GeocoreResult<RequestSpec> {
    // Fail fast on an incomplete multipart spec, before any encoding work.
    let upload = match body {
        Some(Body::Multipart(upload)) => Some(upload.validate()?),
        _ => None,
    };

    let mut url = format!("{base_url}{path}");
    let mut headers = Vec::new();
    if let Some(token) = token {
        headers.push((ACCESS_TOKEN_HEADER.to_owned(), token.to_owned()));
    }

    // Parameter placement: with an explicit body the parameters always
    // ride on the query string; otherwise the method decides.
    let mut params_as_payload = None;
    if let Some(params) = params {
        if body.is_some() || method.queries_by_default() {
            append_query(&mut url, &query_string(params));
        } else {
            params_as_payload = Some(params);
        }
    }

    let payload = match body {
        Some(Body::Json(map)) => {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
            Some(json_bytes(map)?)
        }
        Some(Body::Multipart(_)) => {
            let boundary = generate_boundary();
            headers.push((
                "Content-Type".to_owned(),
                format!("multipart/form-data; boundary={boundary}"),
            ));
            upload.map(|upload| multipart_payload(&upload, &boundary))
        }
        None => match params_as_payload {
            Some(map) => {
                headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
                Some(json_bytes(map)?)
            }
            None => None,
        },
    };

    Ok(RequestSpec {
        method,
        url,
        headers,
        body: payload,
    })
}
