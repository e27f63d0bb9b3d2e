use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};
use log::info;
use serde::Deserialize;

use wordgen_core::io::{list_files, load_training_set, resolve_data_dir};
use wordgen_core::model::config::{DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE};
use wordgen_core::{Classification, Strategy, WordGenerator, WordgenConfig, build_model};

/// Training files the server accepts from the data directory.
const TRAINING_EXTENSIONS: [&str; 2] = ["json", "txt"];

/// Query parameters for the `/v1/generate` endpoint.
#[derive(Deserialize)]
struct GenerateParams {
	count: Option<usize>,
}

/// Query parameters for the `/v1/model` endpoint.
#[derive(Deserialize)]
struct ModelQuery {
	names: Option<String>,
	strategy: Option<String>,
	depth: Option<usize>,
	min: Option<usize>,
	max: Option<usize>,
	retry: Option<usize>,
	append: Option<bool>,
}

/// Body of the `/v1/words` endpoint.
#[derive(Deserialize)]
struct WordsBody {
	words: Vec<String>,
	#[serde(default)]
	strategy: Strategy,
	#[serde(default)]
	config: WordgenConfig,
}

impl GenerateParams {
	/// Requested batch size, bounded by `MAX_BATCH_SIZE`.
	fn count(&self) -> Result<usize, String> {
		match self.count {
			None => Ok(DEFAULT_BATCH_SIZE),
			Some(count) if count > MAX_BATCH_SIZE => {
				Err(format!("Batch size {count} exceeds the maximum of {MAX_BATCH_SIZE}"))
			}
			Some(count) => Ok(count),
		}
	}
}

struct SharedData {
	data_dir: PathBuf,
	training: Vec<String>,
	model: Option<WordGenerator>,
}

impl ModelQuery {
	/// Builds the generator configuration, falling back to defaults for
	/// missing parameters.
	fn config(&self) -> Result<WordgenConfig, String> {
		let defaults = WordgenConfig::default();
		WordgenConfig::new(
			self.depth.unwrap_or(defaults.depth()),
			self.min.unwrap_or(defaults.min()),
			self.max.unwrap_or(defaults.max()),
			self.retry.unwrap_or(defaults.retry_count()),
		)
		.map_err(|e| e.to_string())
	}

	fn strategy(&self) -> Result<Strategy, String> {
		match &self.strategy {
			None => Ok(Strategy::default()),
			Some(s) => s.parse().map_err(|e: wordgen_core::ConfigError| e.to_string()),
		}
	}

	/// Parses the comma-separated list of training file names.
	fn names(&self) -> Result<Vec<&str>, String> {
		let names: Vec<&str> = match &self.names {
			Some(s) => s.split(',').map(str::trim).filter(|s| !s.is_empty()).collect(),
			None => Vec::new(),
		};
		if names.is_empty() {
			return Err("Missing or empty dictionary name".to_owned());
		}
		if names.iter().any(|name| name.contains('/') || name.contains("..")) {
			return Err("Dictionary names must be plain file names".to_owned());
		}
		Ok(names)
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a batch of words with the current model and returns its
/// classification against the training words as JSON.
#[get("/v1/generate")]
async fn get_generated(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<GenerateParams>,
) -> impl Responder {
	let count = match query.count() {
		Ok(count) => count,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let model = match &shared_data.model {
		Some(model) => model,
		None => return HttpResponse::Conflict().body("No model built yet"),
	};

	let batch = model.generate_batch(count);
	let classification = Classification::new(&shared_data.training, batch, model.config());
	info!(
		"generated {} words: {} original, {} duplicated, {} invalid",
		classification.len(),
		classification.has_original_count,
		classification.duplication_count,
		classification.invalid_count
	);
	HttpResponse::Ok().json(classification)
}

/// HTTP GET endpoint `/v1/dictionaries`
///
/// Lists the training files available in the data directory.
#[get("/v1/dictionaries")]
async fn get_dictionaries(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let data_dir = match data.lock() {
		Ok(m) => m.data_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match list_files(&data_dir, &TRAINING_EXTENSIONS) {
		Ok(files) => HttpResponse::Ok().body(files.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list dictionaries"),
	}
}

/// HTTP PUT endpoint `/v1/model`
///
/// Loads the named training files from the data directory and builds a new
/// model. With `append=true` the loaded words follow the current ones.
#[put("/v1/model")]
async fn put_model(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<ModelQuery>,
) -> impl Responder {
	let (names, strategy, config) = match (query.names(), query.strategy(), query.config()) {
		(Ok(names), Ok(strategy), Ok(config)) => (names, strategy, config),
		(Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
			return HttpResponse::BadRequest().body(e);
		}
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let paths: Vec<PathBuf> = names
		.iter()
		.map(|name| shared_data.data_dir.join(name))
		.collect();
	let append = query.append.unwrap_or(false);
	let words = match load_training_set(&paths, &shared_data.training, append) {
		Ok(words) => words,
		Err(e) => {
			return HttpResponse::BadRequest().body(format!("Failed to load dictionaries: {e}"));
		}
	};

	rebuild(&mut shared_data, words, strategy, config)
}

/// HTTP PUT endpoint `/v1/words`
///
/// Builds a new model from an explicit word list.
#[put("/v1/words")]
async fn put_words(
	data: web::Data<Mutex<SharedData>>,
	body: web::Json<WordsBody>,
) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let WordsBody { words, strategy, config } = body.into_inner();
	rebuild(&mut shared_data, words, strategy, config)
}

fn rebuild(
	shared_data: &mut SharedData,
	words: Vec<String>,
	strategy: Strategy,
	config: WordgenConfig,
) -> HttpResponse {
	match build_model(&words, config, strategy) {
		Ok(model) => {
			info!("built {} model from {} words", strategy, words.len());
			let body = format!(
				"Model built: {} transitions from {} words",
				model.table().len(),
				words.len()
			);
			shared_data.model = Some(model);
			shared_data.training = words;
			HttpResponse::Ok().body(body)
		}
		Err(e) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

/// Main entry point for the server.
///
/// Wraps the shared model in a `Mutex` and starts an Actix-web HTTP server.
///
/// # Notes
/// - `WORDGEN_DATA_DIR` sets the dictionary directory (default `./data`).
/// - `WORDGEN_BIND` sets the listening address (default `127.0.0.1:5000`).
/// - CORS is permissive so that a browser front end can call the API.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let data_dir = std::env::var("WORDGEN_DATA_DIR").unwrap_or_else(|_| "./data".to_owned());
	let data_dir = resolve_data_dir(&data_dir);
	let bind = std::env::var("WORDGEN_BIND").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());

	let shared_data = SharedData {
		data_dir,
		training: Vec::new(),
		model: None,
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	info!("listening on {}", bind);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_dictionaries)
			.service(put_model)
			.service(put_words)
	})
	.bind(bind)?
	.run()
	.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;

	fn shared_with_model() -> web::Data<Mutex<SharedData>> {
		let words: Vec<String> = ["kalina", "toremu", "salika", "meroti"]
			.iter()
			.map(|w| w.to_string())
			.collect();
		let model = build_model(&words, WordgenConfig::default(), Strategy::Normal).unwrap();
		web::Data::new(Mutex::new(SharedData {
			data_dir: PathBuf::from("."),
			training: words,
			model: Some(model),
		}))
	}

	#[::core::prelude::v1::test]
	fn batch_size_is_bounded() {
		assert_eq!(GenerateParams { count: None }.count(), Ok(DEFAULT_BATCH_SIZE));
		assert_eq!(GenerateParams { count: Some(MAX_BATCH_SIZE) }.count(), Ok(MAX_BATCH_SIZE));
		assert!(GenerateParams { count: Some(MAX_BATCH_SIZE + 1) }.count().is_err());
		assert!(GenerateParams { count: Some(usize::MAX / 8) }.count().is_err());
	}

	#[actix_web::test]
	async fn oversized_batch_is_rejected_and_model_stays_usable() {
		let shared = shared_with_model();
		let app = App::new().app_data(shared.clone()).service(get_generated);
		let app = test::init_service(app).await;

		let req = test::TestRequest::get()
			.uri(&format!("/v1/generate?count={}", usize::MAX / 8))
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
		assert!(!shared.is_poisoned());

		let req = test::TestRequest::get().uri("/v1/generate?count=5").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);
	}

	#[actix_web::test]
	async fn generate_without_model_is_a_conflict() {
		let shared = web::Data::new(Mutex::new(SharedData {
			data_dir: PathBuf::from("."),
			training: Vec::new(),
			model: None,
		}));
		let app = test::init_service(App::new().app_data(shared).service(get_generated)).await;

		let req = test::TestRequest::get().uri("/v1/generate").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::CONFLICT);
	}
}
