use crate::{
    foundation::core::Bitmap,
    foundation::math::{mul_div255_u8, opacity_to_u8},
};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over of premultiplied pixels with an extra opacity multiplier.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = u16::from(opacity_to_u8(opacity));
    if op == 0 || src[3] == 0 {
        return dst;
    }

    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Composite `src` over `dst` with its top-left corner at `(x, y)`; parts outside `dst` are
/// clipped.
pub fn draw_over(dst: &mut Bitmap, src: &Bitmap, x: i64, y: i64, opacity: f32) {
    if src.is_empty() || dst.is_empty() || opacity_to_u8(opacity) == 0 {
        return;
    }
    let (dw, dh) = (i64::from(dst.width), i64::from(dst.height));
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(src.width)).min(dw);
    let y1 = (y + i64::from(src.height)).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for dy in y0..y1 {
        let sy = dy - y;
        for dx in x0..x1 {
            let sx = dx - x;
            let si = ((sy * i64::from(src.width) + sx) as usize) * 4;
            let di = ((dy * dw + dx) as usize) * 4;
            let s = [
                src.rgba8_premul[si],
                src.rgba8_premul[si + 1],
                src.rgba8_premul[si + 2],
                src.rgba8_premul[si + 3],
            ];
            let d = [
                dst.rgba8_premul[di],
                dst.rgba8_premul[di + 1],
                dst.rgba8_premul[di + 2],
                dst.rgba8_premul[di + 3],
            ];
            dst.rgba8_premul[di..di + 4].copy_from_slice(&over(d, s, opacity));
        }
    }
}

/// Multiply every premultiplied channel by `opacity`.
pub fn scale_opacity(bitmap: &mut Bitmap, opacity: f32) {
    let op = u16::from(opacity_to_u8(opacity));
    if op == 255 {
        return;
    }
    for c in bitmap.rgba8_premul.iter_mut() {
        *c = mul_div255_u8(u16::from(*c), op);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
