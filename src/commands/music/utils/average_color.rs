//! Average colour of a thumbnail, used as the embed accent colour.

use image::imageops::FilterType;
use serenity::async_trait;
use tracing::debug;

use super::music_manager::{MusicError, MusicResult};

/// Computes the average colour of the image behind a URL as `0xRRGGBB`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ColorExtractor: Send + Sync {
    async fn average_color(&self, image_url: &str) -> MusicResult<u32>;
}

/// Downloads the image with reqwest and averages it locally.
#[derive(Debug, Clone)]
pub struct ThumbnailColor {
    client: reqwest::Client,
}

impl ThumbnailColor {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ColorExtractor for ThumbnailColor {
    async fn average_color(&self, image_url: &str) -> MusicResult<u32> {
        let bytes = self
            .client
            .get(image_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        debug!("Fetched {} bytes of thumbnail from {}", bytes.len(), image_url);

        let rgb = average_rgb(&bytes)?;
        Ok(rgb_to_hex(rgb))
    }
}

/// Side length images are shrunk to before sampling.
const SAMPLE_SIZE: u32 = 64;

/// Root-mean-square average of the opaque pixels, weighted by alpha.
pub fn average_rgb(bytes: &[u8]) -> MusicResult<[u8; 3]> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| MusicError::ColorError(format!("Failed to decode image: {}", e)))?
        .resize(SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Nearest)
        .to_rgba8();

    let mut sums = [0f64; 3];
    let mut weight = 0f64;
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = f64::from(a);
        sums[0] += f64::from(r).powi(2) * alpha;
        sums[1] += f64::from(g).powi(2) * alpha;
        sums[2] += f64::from(b).powi(2) * alpha;
        weight += alpha;
    }

    if weight == 0.0 {
        return Ok([0, 0, 0]);
    }

    Ok(sums.map(|sum| (sum / weight).sqrt().round().clamp(0.0, 255.0) as u8))
}

pub const fn rgb_to_hex(rgb: [u8; 3]) -> u32 {
    ((rgb[0] as u32) << 16) | ((rgb[1] as u32) << 8) | (rgb[2] as u32)
}
