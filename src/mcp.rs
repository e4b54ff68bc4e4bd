//! rasterfilter MCP (Model Context Protocol) server
//!
//! Standalone server binary exposing the edge detector, grayscale and
//! brightness filters as MCP tools over line-delimited JSON-RPC on
//! stdin/stdout.

use clap::ValueEnum;
use log::{debug, warn};
use rasterfilter::{Direction, Filter, FilterOptions, apply_filter};
use serde_json::{Map, Value, json};
use std::io::{self, BufRead, Write};
use std::path::Path;

const INVALID_PARAMS: i32 = -32602;
const METHOD_NOT_FOUND: i32 = -32601;
const SERVER_ERROR: i32 = -32000;

/// MCP Request structure
#[derive(Debug, serde::Deserialize)]
struct McpRequest {
    #[serde(default)]
    #[allow(dead_code)]
    jsonrpc: String,
    #[serde(flatten)]
    kind: RequestKind,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum RequestKind {
    Initialize { id: Value, params: Value },
    ToolsList { id: Value },
    ToolsCall { id: Value, params: ToolCallParams },
}

#[derive(Debug, serde::Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// MCP Response structure
#[derive(Debug, serde::Serialize)]
struct McpResponse {
    jsonrpc: String,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, serde::Serialize)]
struct McpError {
    code: i32,
    message: String,
}

impl McpResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code,
                message: message.into(),
            }),
        }
    }
}

fn io_schema(extra: Value) -> Value {
    let mut properties = json!({
        "input_path": {
            "type": "string",
            "description": "Path to the input PNG image"
        },
        "output_path": {
            "type": "string",
            "description": "Path where the single-channel PNG result will be saved"
        }
    });
    if let (Some(props), Value::Object(extra)) = (properties.as_object_mut(), extra) {
        props.extend(extra);
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": ["input_path", "output_path"]
    })
}

struct RasterFilterMcpServer;

impl RasterFilterMcpServer {
    fn handle_initialize(&self, _params: Value, id: Value) -> McpResponse {
        McpResponse::success(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "serverInfo": {
                    "name": "rasterfilter",
                    "version": env!("CARGO_PKG_VERSION")
                },
                "capabilities": {
                    "tools": {
                        "listChanged": false
                    }
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Value) -> McpResponse {
        McpResponse::success(
            id,
            json!({
                "tools": [
                    {
                        "name": "detect_edges",
                        "description": "Detect edges in an image with the Sobel operator. The image is converted to grayscale, convolved with horizontal and vertical gradient kernels, and edges above the threshold are amplified while weaker ones are suppressed.",
                        "inputSchema": io_schema(json!({
                            "threshold": {
                                "type": "integer",
                                "description": "Gradient magnitude above which edges are boosted (0-255, default: 100)",
                                "minimum": 0,
                                "maximum": 255,
                                "default": 100
                            },
                            "strength_ratio": {
                                "type": "number",
                                "description": "Amplification/suppression factor (0.0-1.0, default: 0.3)",
                                "minimum": 0.0,
                                "maximum": 1.0,
                                "default": 0.3
                            },
                            "direction": {
                                "type": "string",
                                "description": "Gradient(s) to use: horizontal, vertical or both (default: both)",
                                "enum": ["horizontal", "vertical", "both"],
                                "default": "both"
                            }
                        }))
                    },
                    {
                        "name": "convert_to_grayscale",
                        "description": "Convert an image to single-channel grayscale using 0.21 R + 0.72 G + 0.07 B.",
                        "inputSchema": io_schema(json!({}))
                    },
                    {
                        "name": "change_brightness",
                        "description": "Convert an image to grayscale and add a brightness offset, saturating at black and white.",
                        "inputSchema": io_schema(json!({
                            "delta": {
                                "type": "integer",
                                "description": "Brightness offset (-128 to 127, default: 20)",
                                "minimum": -128,
                                "maximum": 127,
                                "default": 20
                            }
                        }))
                    }
                ]
            }),
        )
    }

    fn handle_tools_call(&self, params: ToolCallParams, id: Value) -> McpResponse {
        let filter = match params.name.as_str() {
            "detect_edges" => Filter::Sobel,
            "convert_to_grayscale" => Filter::Grayscale,
            "change_brightness" => Filter::Brightness,
            _ => {
                return McpResponse::failure(id, METHOD_NOT_FOUND, format!("Unknown tool: {}", params.name));
            }
        };

        let args = if let Value::Object(map) = params.arguments {
            map
        } else {
            return McpResponse::failure(id, INVALID_PARAMS, "Invalid arguments: expected object");
        };

        let input_path = args.get("input_path").and_then(|v| v.as_str());
        let output_path = args.get("output_path").and_then(|v| v.as_str());
        let (input, output) = match (input_path, output_path) {
            (Some(input), Some(output)) => (input, output),
            _ => {
                return McpResponse::failure(
                    id,
                    INVALID_PARAMS,
                    "Missing required parameters: input_path and output_path",
                );
            }
        };

        let options = match parse_options(&args) {
            Ok(options) => options,
            Err(message) => return McpResponse::failure(id, INVALID_PARAMS, message),
        };
        debug!("tools/call {} {:?}", params.name, options);

        match apply_filter(Path::new(input), Path::new(output), filter, &options) {
            Ok(()) => McpResponse::success(
                id,
                json!({
                    "content": [
                        {
                            "type": "text",
                            "text": format!("Successfully filtered {} to {}", input, output)
                        }
                    ]
                }),
            ),
            Err(e) => McpResponse::failure(id, SERVER_ERROR, format!("Filtering failed: {:#}", e)),
        }
    }

    fn run(&self) {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut stdout_lock = stdout.lock();

        for line in stdin.lock().lines() {
            let Ok(json_str) = line else { break };
            let req = match serde_json::from_str::<McpRequest>(&json_str) {
                Ok(req) => req,
                Err(e) => {
                    warn!("ignoring malformed request: {}", e);
                    continue;
                }
            };

            let response = match req.kind {
                RequestKind::Initialize { id, params } => self.handle_initialize(params, id),
                RequestKind::ToolsList { id } => self.handle_tools_list(id),
                RequestKind::ToolsCall { id, params } => self.handle_tools_call(params, id),
            };

            if let Ok(response_json) = serde_json::to_string(&response) {
                writeln!(stdout_lock, "{}", response_json).ok();
                stdout_lock.flush().ok();
            }
        }
    }
}

/// Read the optional filter parameters, falling back to the defaults.
fn parse_options(args: &Map<String, Value>) -> Result<FilterOptions, String> {
    let mut options = FilterOptions::default();

    if let Some(v) = args.get("threshold") {
        let threshold = v
            .as_u64()
            .and_then(|t| u8::try_from(t).ok())
            .ok_or("threshold must be an integer between 0 and 255")?;
        options.edges.threshold = threshold;
    }
    if let Some(v) = args.get("strength_ratio") {
        let ratio = v.as_f64().ok_or("strength_ratio must be a number")?;
        options.edges.strength_ratio = ratio;
    }
    if let Some(v) = args.get("direction") {
        let name = v.as_str().ok_or("direction must be a string")?;
        options.edges.direction = Direction::from_str(name, true)?;
    }
    if let Some(v) = args.get("delta") {
        let delta = v
            .as_i64()
            .and_then(|d| i8::try_from(d).ok())
            .ok_or("delta must be an integer between -128 and 127")?;
        options.brightness = delta;
    }

    options.edges.validate().map_err(|e| e.to_string())?;
    Ok(options)
}

fn main() {
    // Logs go to stderr; stdout carries the protocol
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let server = RasterFilterMcpServer;
    server.run();
}
