use std::path::Path;

use crate::core::InvoiceError;

/// PDF colour space of the banner's JPEG data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceGray,
    DeviceRgb,
    /// Four-component JPEGs, as written by Adobe tools with inverted samples.
    DeviceCmyk,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::DeviceGray => "DeviceGray",
            Self::DeviceRgb => "DeviceRGB",
            Self::DeviceCmyk => "DeviceCMYK",
        }
    }

    /// `Decode` array for the image dictionary, if the samples need remapping.
    pub fn decode(&self) -> Option<[i64; 8]> {
        match self {
            Self::DeviceCmyk => Some([1, 0, 1, 0, 1, 0, 1, 0]),
            _ => None,
        }
    }
}

/// The branding image printed across the top of the first page.
///
/// JPEG data is kept as-is and embedded with `DCTDecode`; only the frame
/// header is parsed for its dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerImage {
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    pub data: Vec<u8>,
}

impl BannerImage {
    /// Read and parse the banner at `path`.
    pub fn load(path: &Path) -> Result<Self, InvoiceError> {
        let data = std::fs::read(path).map_err(|e| InvoiceError::AssetMissing {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_jpeg(data).map_err(|reason| InvoiceError::AssetMissing {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse JPEG bytes.
    pub fn from_jpeg(data: Vec<u8>) -> Result<Self, String> {
        if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
            return Err("not a JPEG image".to_string());
        }
        let (width, height, components) = jpeg_dimensions(&data)?;
        if width == 0 || height == 0 {
            return Err(format!("JPEG has empty dimensions {width}x{height}"));
        }
        let color_space = match components {
            1 => ColorSpace::DeviceGray,
            3 => ColorSpace::DeviceRgb,
            4 => ColorSpace::DeviceCmyk,
            n => return Err(format!("unsupported JPEG component count {n} (expected 1, 3 or 4)")),
        };
        Ok(Self {
            width,
            height,
            color_space,
            data,
        })
    }

    /// Height over width of the source image.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }
}

/// Scan for the first SOF0..SOF3 marker and read width, height and component count.
fn jpeg_dimensions(data: &[u8]) -> Result<(u32, u32, u8), String> {
    let len = data.len();
    let mut i = 2;
    while i + 1 < len {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        if (0xC0..=0xC3).contains(&marker) {
            if i + 9 >= len {
                return Err("JPEG frame header truncated".to_string());
            }
            let height = u32::from(u16::from_be_bytes([data[i + 5], data[i + 6]]));
            let width = u32::from(u16::from_be_bytes([data[i + 7], data[i + 8]]));
            return Ok((width, height, data[i + 9]));
        }
        // fill bytes and stuffed zeros
        if marker == 0xFF || marker == 0x00 {
            i += 1;
            continue;
        }
        // standalone markers carry no length
        if marker == 0xD8 || marker == 0xD9 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }
        if i + 3 >= len {
            break;
        }
        let segment = usize::from(u16::from_be_bytes([data[i + 2], data[i + 3]]));
        i += 2 + segment;
    }
    Err("no JPEG frame header found".to_string())
}

/// Minimal JPEG byte stream with a SOF0 header, for tests.
#[cfg(test)]
pub(crate) fn test_jpeg(width: u16, height: u16) -> Vec<u8> {
    test_jpeg_with_components(width, height, 3)
}

#[cfg(test)]
pub(crate) fn test_jpeg_with_components(width: u16, height: u16, components: u8) -> Vec<u8> {
    let [wh, wl] = width.to_be_bytes();
    let [hh, hl] = height.to_be_bytes();
    let [lh, ll] = (8 + 3 * u16::from(components)).to_be_bytes();
    let mut data = vec![
        0xFF, 0xD8, // SOI
        0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00,
        0x01, 0x00, 0x00, // APP0
        0xFF, 0xC0, lh, ll, 0x08, hh, hl, wh, wl, components, // SOF0
    ];
    for id in 1..=components {
        data.extend_from_slice(&[id, 0x11, 0x00]);
    }
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}
