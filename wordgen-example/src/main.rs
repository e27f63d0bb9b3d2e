use wordgen_core::io::load_words;
use wordgen_core::{ALL_STRATEGIES, Classification, WordgenConfig, build_model};

/// Number of words printed per strategy.
const SHOWN: usize = 10;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	// Word list (one word per line) or JSON dictionary
	let path = std::env::args().nth(1).unwrap_or_else(|| "./data/words.txt".to_owned());
	let words = load_words(&path)?;
	println!("Loaded {} words from {}", words.len(), path);

	// k-gram length 3, accepted lengths 4..=8, 20 attempts per word
	let config = WordgenConfig::new(3, 4, 8, 20)?;

	// Attempting an inverted length range
	match WordgenConfig::new(3, 8, 4, 20) {
		Ok(_) => println!("Should not happen"),
		Err(e) => println!("Rejected configuration: {}", e),
	}

	for strategy in ALL_STRATEGIES {
		let generator = build_model(&words, config, strategy)?;
		println!("\n== {} ({} transitions)", strategy, generator.table().len());

		if let Some(extremes) = generator.prefix_extremes() {
			println!(
				"most common 2-gram prefixes ({}x): {}",
				extremes.max_frequency,
				extremes.max_prefixes.join(", ")
			);
		}

		let batch = generator.generate_batch(500);
		let classification = Classification::new(&words, batch, &config);

		for word in classification.words.iter().take(SHOWN) {
			let mut flags = Vec::new();
			if word.has_original {
				flags.push("original");
			}
			if word.is_duplicated {
				flags.push("duplicated");
			}
			if word.is_invalid {
				flags.push("invalid");
			}
			println!("{:<12} {}", word.word, flags.join(" "));
		}

		println!(
			"original: {} ({:.2}%), duplicated: {} ({:.2}%), invalid: {} ({:.2}%)",
			classification.has_original_count,
			classification.has_original_percent(),
			classification.duplication_count,
			classification.duplication_percent(),
			classification.invalid_count,
			classification.invalid_percent()
		);
	}

	Ok(())
}
