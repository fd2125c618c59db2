use std::env;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use log::info;
use serde::Deserialize;

use phonogen_core::{ConfigError, GenerationInput, Generator, MAX_SYLLABLES, Variety, WordShape};

/// Upper bound of words returned by one request.
const MAX_COUNT: usize = 1000;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize, Default)]
struct GenerateParams {
	variety: Option<String>,
	max_syllables: Option<usize>,
	count: Option<usize>,
	onset_probability: Option<f64>,
	coda_probability: Option<f64>,
	silent_letter_probability: Option<f64>,
}

impl GenerateParams {
	/// Builds the generation input described by the query.
	///
	/// Without a `variety`, every loaded variety is equally likely.
	fn input(&self, generator: &Generator) -> Result<GenerationInput, ConfigError> {
		let mut input = generator.make_generation_input();
		if let Some(name) = &self.variety {
			input.only(name.parse::<Variety>()?)?;
		}

		let mut shape = WordShape::new(self.max_syllables.unwrap_or(3))?;
		if let Some(p) = self.onset_probability {
			shape.set_onset_probability(p)?;
		}
		if let Some(p) = self.coda_probability {
			shape.set_coda_probability(p)?;
		}
		if let Some(p) = self.silent_letter_probability {
			shape.set_silent_letter_probability(p)?;
		}
		input.shape = shape;
		Ok(input)
	}

	fn count(&self) -> Result<usize, String> {
		match self.count.unwrap_or(1) {
			0 => Err("count must be at least 1".into()),
			n if n > MAX_COUNT => Err(format!("count must be at most {MAX_COUNT}")),
			n => Ok(n),
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates `count` words and returns them newline separated.
/// Invalid parameters are answered with `400 Bad Request`.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Generator>, query: web::Query<GenerateParams>) -> impl Responder {
	let input = match query.input(&data) {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	};
	let count = match query.count() {
		Ok(count) => count,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let mut rng = rand::rng();
	let mut words = Vec::with_capacity(count);
	for _ in 0..count {
		match data.generate(&mut rng, &input) {
			Ok(word) => words.push(word),
			Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
		}
	}

	HttpResponse::Ok().body(words.join("\n"))
}

#[get("/v1/varieties")]
async fn get_varieties(data: web::Data<Generator>) -> impl Responder {
	HttpResponse::Ok().body(data.variety_names().join("\n"))
}

/// Main entry point for the server.
///
/// Builds or loads one engine per variety, shares the generator read-only
/// across workers and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to `PHONOGEN_BIND`, 127.0.0.1:5000 by default.
/// - Engine snapshots live in `PHONOGEN_DATA`, `./data` by default.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let bind = env::var("PHONOGEN_BIND").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());
	let data_dir = env::var("PHONOGEN_DATA").unwrap_or_else(|_| "./data".to_owned());

	let generator = web::Data::new(Generator::with_snapshots(&data_dir)?);
	info!("Listening on {bind}");

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(generator.clone())
			.service(get_generated)
			.service(get_varieties)
	})
		.bind(bind)?
		.run()
		.await?;

	Ok(())
}
