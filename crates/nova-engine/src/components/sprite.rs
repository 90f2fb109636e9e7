/// A frame cut out of a loaded image (a whole image or one cell of an atlas).
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Name of the image in the resource loader.
    pub image: String,
    /// Left edge of the frame inside the image, in pixels.
    pub atlas_x: f32,
    /// Top edge of the frame inside the image, in pixels.
    pub atlas_y: f32,
    /// Frame width in pixels.
    pub width: f32,
    /// Frame height in pixels.
    pub height: f32,
}

impl SpriteComponent {
    /// A frame covering the whole `width × height` image.
    pub fn whole(image: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            image: image.into(),
            atlas_x: 0.0,
            atlas_y: 0.0,
            width,
            height,
        }
    }

    /// The cell at `(col, row)` of an atlas made of `cell_width × cell_height` cells.
    pub fn cell(image: impl Into<String>, col: u32, row: u32, cell_width: f32, cell_height: f32) -> Self {
        Self {
            image: image.into(),
            atlas_x: col as f32 * cell_width,
            atlas_y: row as f32 * cell_height,
            width: cell_width,
            height: cell_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atlas_cell_offsets() {
        let sprite = SpriteComponent::cell("tiles", 3, 2, 16.0, 32.0);
        assert_eq!(sprite.atlas_x, 48.0);
        assert_eq!(sprite.atlas_y, 64.0);
        assert_eq!(sprite.width, 16.0);
    }
}
