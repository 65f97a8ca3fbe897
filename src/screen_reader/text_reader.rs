//! Text recognition for the loot list and fuzzy matching helpers

use std::collections::{BTreeMap, HashMap};

use image::{imageops::FilterType, DynamicImage, RgbaImage};
use rusty_tesseract::{Args, Image as TessImage};

use crate::error::{BotError, BotResult};

/// One recognized word and where it sits in the captured image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub left: u32,
    pub top: u32,
}

impl Word {
    pub fn new(text: impl Into<String>, left: u32, top: u32) -> Self {
        Self {
            text: text.into(),
            left,
            top,
        }
    }
}

/// Optical text recognition over a captured buffer
pub trait TextReader {
    /// Recognize words in `image` after upscaling it by `scale`.
    /// Word coordinates are reported in the unscaled image space.
    fn read_text(&self, image: &RgbaImage, scale: u32) -> BotResult<Vec<Word>>;
}

/// Minimum Tesseract confidence for a word to be kept
const MIN_WORD_CONFIDENCE: f32 = 30.0;

/// Tesseract-backed reader
pub struct TesseractReader {
    lang: String,
}

impl TesseractReader {
    pub fn new(lang: impl Into<String>) -> Self {
        Self { lang: lang.into() }
    }

    fn args(&self) -> Args {
        Args {
            lang: self.lang.clone(),
            config_variables: HashMap::new(),
            dpi: Some(150),
            psm: Some(6), // Uniform block of text - one loot name per line
            oem: Some(3),
        }
    }
}

impl Default for TesseractReader {
    fn default() -> Self {
        Self::new("eng")
    }
}

impl TextReader for TesseractReader {
    fn read_text(&self, image: &RgbaImage, scale: u32) -> BotResult<Vec<Word>> {
        let scale = scale.max(1);
        let scaled = image::imageops::resize(
            image,
            image.width() * scale,
            image.height() * scale,
            FilterType::CatmullRom,
        );
        let dynamic_img = DynamicImage::ImageRgba8(scaled);

        let tess_image = TessImage::from_dynamic_image(&dynamic_img)
            .map_err(|e| BotError::Recognition(format!("Failed to create Tesseract image: {:?}", e)))?;

        let output = rusty_tesseract::image_to_data(&tess_image, &self.args())
            .map_err(|e| BotError::Recognition(format!("OCR failed: {:?}", e)))?;

        let words: Vec<Word> = output
            .data
            .into_iter()
            .filter(|d| d.conf >= MIN_WORD_CONFIDENCE && !d.text.trim().is_empty())
            .map(|d| {
                Word::new(
                    d.text.trim(),
                    d.left.max(0) as u32 / scale,
                    d.top.max(0) as u32 / scale,
                )
            })
            .collect();

        tracing::debug!("[OCR] Recognized {} words", words.len());
        Ok(words)
    }
}

/// Similarity of two strings in percent (0..=100), case-insensitive
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 100.0;
    }
    let distance = levenshtein::levenshtein(&a, &b);
    (1.0 - distance as f64 / longest as f64) * 100.0
}

/// Group words into loot rows of `item_height` pixels.
///
/// Rows are contiguous from the top of the list: a row with no recognized
/// words comes back as an empty string so that row `i` always sits at
/// `i * item_height`.
pub fn sort_words_by_item(words: &[Word], item_height: u32) -> Vec<String> {
    let item_height = item_height.max(1);
    let mut rows: BTreeMap<u32, Vec<&Word>> = BTreeMap::new();
    for word in words {
        rows.entry(word.top / item_height).or_default().push(word);
    }

    let Some(&last) = rows.keys().next_back() else {
        return Vec::new();
    };

    (0..=last)
        .map(|row| {
            let mut row_words = rows.remove(&row).unwrap_or_default();
            row_words.sort_by_key(|w| w.left);
            row_words
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
