use rand::Rng;

use crate::MdrunError;
use crate::MdrunResult;
use crate::config::BrandConfig;

/// Render a word with one randomly drawn, never-repeated color per
/// character and a coin-flipped emphasis delimiter (`#` or `*`) around
/// each. A zero-width space after each character keeps adjacent emphasis
/// spans from merging. Letter case is flipped per character as well.
///
/// The palette is an explicit argument and the unused remainder is handed
/// back, so repeated calls can share one palette without hidden state.
pub fn decorate<R: Rng>(
	word: &str,
	mut palette: Vec<String>,
	rng: &mut R,
) -> MdrunResult<(String, Vec<String>)> {
	if palette.len() < word.chars().count() {
		return Err(MdrunError::PaletteTooSmall {
			word: word.to_string(),
			colors: palette.len(),
		});
	}

	let mut rendered = String::new();

	for ch in word.chars() {
		let color = palette.remove(rng.random_range(0..palette.len()));
		let sep = if rng.random_bool(0.5) { '#' } else { '*' };
		let cased: String = if rng.random_bool(0.5) {
			ch.to_uppercase().collect()
		} else {
			ch.to_lowercase().collect()
		};
		rendered.push_str(&format!("[{color}]{sep}{cased}{sep}\u{200b}"));
	}

	Ok((rendered, palette))
}

/// Produce a fresh decorative rendering of the configured brand word.
pub fn decorate_brand(config: &BrandConfig) -> MdrunResult<String> {
	let (rendered, _) = decorate(&config.word, config.palette.clone(), &mut rand::rng())?;
	Ok(rendered)
}

/// Replace every occurrence of the brand token in a line with a fresh
/// decorative rendering. Lines without the token pass through unchanged.
pub fn apply_brand(line: &str, config: &BrandConfig) -> MdrunResult<String> {
	if !line.contains(&config.token) {
		return Ok(line.to_string());
	}

	let rendered = decorate_brand(config)?;
	Ok(line.replace(&config.token, &rendered))
}
