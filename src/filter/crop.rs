//! Crop padding for downstream recognizers.

use image::{imageops, Rgb, RgbImage};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Pad an image so both sides are at least `min_size` pixels.
///
/// The original is centered on a white canvas of
/// `max(width, min_size) x max(height, min_size)`; when the odd pixel cannot be
/// split evenly it goes to the right or bottom. Images that are already large
/// enough are returned untouched.
///
/// # Examples
///
/// ```
/// use image::RgbImage;
/// use order_oxide::filter::pad_to_min_size;
///
/// let padded = pad_to_min_size(RgbImage::new(10, 40), 28);
/// assert_eq!(padded.dimensions(), (28, 40));
/// ```
pub fn pad_to_min_size(image: RgbImage, min_size: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    let new_width = width.max(min_size);
    let new_height = height.max(min_size);
    if new_width == width && new_height == height {
        return image;
    }

    let mut canvas = RgbImage::from_pixel(new_width, new_height, WHITE);
    let x_offset = (new_width - width) / 2;
    let y_offset = (new_height - height) / 2;
    imageops::overlay(&mut canvas, &image, i64::from(x_offset), i64::from(y_offset));
    canvas
}
