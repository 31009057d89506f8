use std::io;

use actix_cors::Cors;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder, ResponseError};
use log::{error, info, warn};
use serde::Deserialize;

use wordgen_core::{Casing, GenerationInput, Generator};

const BIND_VAR: &str = "WORDGEN_BIND";
const MAX_COUNT_VAR: &str = "WORDGEN_MAX_COUNT";
const MAX_BODY_VAR: &str = "WORDGEN_MAX_BODY_BYTES";
const MAX_OUTPUT_VAR: &str = "WORDGEN_MAX_OUTPUT_BYTES";

const DEFAULT_BIND: &str = "127.0.0.1:5000";
const DEFAULT_MAX_COUNT: usize = 10_000;
const DEFAULT_MAX_BODY_BYTES: usize = 1 << 20;
const DEFAULT_MAX_OUTPUT_BYTES: usize = 1 << 20;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Server settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
struct ServerSettings {
	bind: String,
	/// Largest `count` accepted by `/v1/generate`.
	max_count: usize,
	/// Largest JSON body accepted, word list included.
	max_body_bytes: usize,
	/// Largest output a request may ask for, measured before casing.
	max_output_bytes: usize,
}

impl ServerSettings {
	fn from_env() -> Result<Self, String> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Builds settings from a variable lookup, falling back to defaults
	/// for unset variables.
	fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, String> {
		Ok(Self {
			bind: lookup(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_owned()),
			max_count: parse_var(&lookup, MAX_COUNT_VAR, DEFAULT_MAX_COUNT)?,
			max_body_bytes: parse_var(&lookup, MAX_BODY_VAR, DEFAULT_MAX_BODY_BYTES)?,
			max_output_bytes: parse_var(&lookup, MAX_OUTPUT_VAR, DEFAULT_MAX_OUTPUT_BYTES)?,
		})
	}
}

fn parse_var<F: Fn(&str) -> Option<String>>(lookup: &F, name: &str, default: usize) -> Result<usize, String> {
	match lookup(name) {
		None => Ok(default),
		Some(value) => value
			.trim()
			.parse()
			.map_err(|_| format!("{name} must be a non-negative integer, got {value:?}")),
	}
}

/// JSON body of the `/v1/generate` endpoint.
///
/// The word list travels with each request; every other field is optional
/// and falls back to the `GenerationInput` defaults.
#[derive(Deserialize)]
struct GenerateRequest {
	words: Vec<String>,
	#[serde(flatten)]
	input: GenerationInput,
}

impl GenerateRequest {
	/// Upper bound on the output size before casing: every draw picks the
	/// longest word. `None` on overflow.
	fn worst_case_output_bytes(&self) -> Option<usize> {
		let longest = self.words.iter().map(String::len).max().unwrap_or(0);
		longest
			.checked_add(self.input.separator.len())?
			.checked_mul(self.input.count)
	}
}

/// Errors returned by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
enum ApiError {
	#[error(transparent)]
	Generate(#[from] wordgen_core::Error),
	#[error("count {count} exceeds the maximum of {max}")]
	CountTooLarge { count: usize, max: usize },
	#[error("requested output exceeds the maximum of {max} bytes")]
	OutputTooLarge { max: usize },
}

impl ResponseError for ApiError {
	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::Generate(e) if e.is_configuration() => StatusCode::BAD_REQUEST,
			ApiError::Generate(_) => StatusCode::INTERNAL_SERVER_ERROR,
			ApiError::CountTooLarge { .. } | ApiError::OutputTooLarge { .. } => StatusCode::BAD_REQUEST,
		}
	}

	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(TEXT_PLAIN)
			.body(self.to_string())
	}
}

/// HTTP POST endpoint `/v1/generate`
///
/// Generates a string from the word list and settings in the JSON body.
/// Returns the generated string as a plain text body.
#[post("/v1/generate")]
async fn post_generate(
	settings: web::Data<ServerSettings>,
	request: web::Json<GenerateRequest>,
) -> Result<HttpResponse, ApiError> {
	let request = request.into_inner();

	if request.input.count > settings.max_count {
		warn!("rejected generate request: count {} above {}", request.input.count, settings.max_count);
		return Err(ApiError::CountTooLarge { count: request.input.count, max: settings.max_count });
	}
	if request.worst_case_output_bytes().is_none_or(|bytes| bytes > settings.max_output_bytes) {
		warn!("rejected generate request: output could exceed {} bytes", settings.max_output_bytes);
		return Err(ApiError::OutputTooLarge { max: settings.max_output_bytes });
	}

	let GenerateRequest { words, input } = request;

	let generator = Generator::new(input);
	let output = generator.generate(&words).map_err(|e| {
		if e.is_configuration() {
			warn!("rejected generate request: {e}");
		} else {
			error!("generation failed: {e}");
		}
		ApiError::from(e)
	})?;

	Ok(HttpResponse::Ok().content_type(TEXT_PLAIN).body(output))
}

#[get("/v1/casings")]
async fn get_casings() -> impl Responder {
	let names: Vec<&str> = Casing::ALL.iter().map(Casing::as_str).collect();
	HttpResponse::Ok().content_type(TEXT_PLAIN).body(names.join("\n"))
}

#[get("/v1/health")]
async fn get_health() -> impl Responder {
	HttpResponse::Ok().content_type(TEXT_PLAIN).body("ok")
}

/// Maps malformed or oversized JSON bodies to plain text client errors.
fn json_config(limit: usize) -> web::JsonConfig {
	web::JsonConfig::default()
		.limit(limit)
		.error_handler(|err, _req| {
			let status = match &err {
				JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
					StatusCode::PAYLOAD_TOO_LARGE
				}
				_ => StatusCode::BAD_REQUEST,
			};
			warn!("rejected request body: {err}");
			let response = HttpResponse::build(status).content_type(TEXT_PLAIN).body(err.to_string());
			InternalError::from_response(err, response).into()
		})
}

/// Registers routes and shared data. Used by `main` and by the tests.
fn routes(settings: web::Data<ServerSettings>) -> impl FnOnce(&mut web::ServiceConfig) {
	move |cfg| {
		cfg.app_data(json_config(settings.max_body_bytes))
			.app_data(settings)
			.service(post_generate)
			.service(get_casings)
			.service(get_health);
	}
}

/// Main entry point for the server.
///
/// Reads settings from the environment, then starts an Actix-web HTTP
/// server. Logging is configured through `RUST_LOG` (default `info`).
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let settings = ServerSettings::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
	info!(
		"starting wordgen server on {} (max count {}, max body {} bytes, max output {} bytes)",
		settings.bind, settings.max_count, settings.max_body_bytes, settings.max_output_bytes
	);

	let bind = settings.bind.clone();
	let settings = web::Data::new(settings);

	HttpServer::new(move || {
		let cors = Cors::default()
			.allow_any_origin()
			.allowed_methods(vec!["GET", "POST"])
			.allow_any_header()
			.max_age(3600);

		App::new()
			.wrap(Logger::default())
			.wrap(cors)
			.configure(routes(settings.clone()))
	})
		.bind(bind)?
		.run()
		.await
}
