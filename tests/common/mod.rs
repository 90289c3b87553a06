//! Fixtures shared by the integration tests.
#![allow(dead_code)]

/// Minimal baseline JPEG: SOI, JFIF APP0, a SOF0 frame header, EOI. The
/// scan data is never decoded.
pub fn jpeg(width: u16, height: u16) -> Vec<u8> {
    jpeg_with_components(width, height, 3)
}

pub fn jpeg_with_components(width: u16, height: u16, components: u8) -> Vec<u8> {
    let [wh, wl] = width.to_be_bytes();
    let [hh, hl] = height.to_be_bytes();
    let [lh, ll] = (8 + 3 * u16::from(components)).to_be_bytes();
    let mut data = vec![
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xC0, lh, ll, 0x08, hh, hl, wh, wl, components,
    ];
    for id in 1..=components {
        data.extend_from_slice(&[id, 0x11, 0x00]);
    }
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}
