use crate::assets::font::CaptionFont;
use crate::assets::overlay::OverlayAsset;
use crate::assets::store::{SourceImage, TextBrushRgba8, TextLayoutEngine};
use crate::decor::geometry::{
    BANNER_OPACITY, BannerPlan, CAPTION_TEXT, OVERLAY_OPACITY, TextMeasure, frame_strips,
};
use crate::decor::mode::DecorationMode;
use crate::foundation::core::{ImageSize, Rect};
use crate::foundation::error::{PicframeError, PicframeResult};
use crate::foundation::math::opacity_to_u8;
use crate::render::backend::Composited;
use crate::render::blend::{premul_over_in_place, premul_over_in_place_opacity};

struct CaptionRenderer {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

/// Applies a [`DecorationMode`] to a [`SourceImage`].
///
/// The compositor holds no picture state: every call redraws from the source. It only caches the
/// caption font and a reusable `vello_cpu` render context.
pub struct Compositor {
    caption: Option<CaptionRenderer>,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field(
                "caption_family",
                &self.caption.as_ref().map(|c| c.engine.family_name()),
            )
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Build a compositor. Without a caption font, banner mode draws the band only.
    pub fn new(caption_font: Option<CaptionFont>) -> PicframeResult<Self> {
        let caption = match caption_font {
            Some(font) => {
                let engine = TextLayoutEngine::with_font(font.bytes())?;
                let data = vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
                    0,
                );
                Some(CaptionRenderer { engine, font: data })
            }
            None => None,
        };
        Ok(Self { caption, ctx: None })
    }

    /// A compositor that never draws caption text.
    pub fn without_caption() -> Self {
        Self {
            caption: None,
            ctx: None,
        }
    }

    /// Return `true` when banner captions can be measured and drawn.
    pub fn has_caption_font(&self) -> bool {
        self.caption.is_some()
    }

    /// Resolve banner geometry and caption size for `size`.
    pub fn plan_banner(&mut self, size: ImageSize) -> PicframeResult<BannerPlan> {
        let measure = self
            .caption
            .as_mut()
            .map(|c| &mut c.engine as &mut dyn TextMeasure);
        BannerPlan::new(size, measure)
    }

    /// Draw `source` with the selected decoration on top.
    ///
    /// `mode == None` and overlay mode without an asset both pass the source through unchanged.
    #[tracing::instrument(
        skip_all,
        fields(width = source.width(), height = source.height(), mode = ?mode)
    )]
    pub fn composite(
        &mut self,
        source: &SourceImage,
        mode: Option<DecorationMode>,
        overlay: Option<&OverlayAsset>,
    ) -> PicframeResult<Composited> {
        let size = source.size();
        let mut data = source.rgba8_premul().to_vec();

        match mode {
            None => tracing::debug!("no decoration selected, passing through"),
            Some(DecorationMode::Banner) => {
                let layer = self.banner_layer(size)?;
                premul_over_in_place(&mut data, &layer)?;
            }
            Some(DecorationMode::Frame) => {
                let layer = self.frame_layer(size)?;
                premul_over_in_place(&mut data, &layer)?;
            }
            Some(DecorationMode::Overlay) => match overlay {
                Some(asset) => {
                    let scaled = asset.scaled_to(size)?;
                    premul_over_in_place_opacity(&mut data, &scaled, OVERLAY_OPACITY)?;
                }
                None => tracing::debug!("overlay asset not loaded, passing through"),
            },
        }

        Ok(Composited {
            width: size.width,
            height: size.height,
            data,
        })
    }

    fn banner_layer(&mut self, size: ImageSize) -> PicframeResult<Vec<u8>> {
        let plan = self.plan_banner(size)?;
        if let Some(fit) = plan.font {
            tracing::debug!(
                size_px = fit.size_px,
                width_px = fit.width_px,
                fits = fit.fits,
                "caption fitted"
            );
        }

        self.render_layer(size, |this, ctx| {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                0,
                0,
                0,
                opacity_to_u8(BANNER_OPACITY),
            ));
            ctx.fill_rect(&rect_to_cpu(plan.band));

            let (Some(fit), Some(caption)) = (plan.font, this.caption.as_mut()) else {
                return Ok(());
            };
            let layout =
                caption
                    .engine
                    .layout_line(CAPTION_TEXT, fit.size_px, TextBrushRgba8::WHITE)?;
            let origin =
                plan.caption_origin(f64::from(layout.width()), f64::from(layout.height()));
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    // Positioned glyphs carry the run offset, advances and baseline.
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&caption.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            Ok(())
        })
    }

    fn frame_layer(&mut self, size: ImageSize) -> PicframeResult<Vec<u8>> {
        self.render_layer(size, |_, ctx| {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
            for strip in frame_strips(size) {
                ctx.fill_rect(&rect_to_cpu(strip));
            }
            Ok(())
        })
    }

    /// Rasterize `draw` into a transparent premultiplied RGBA8 layer the size of the image.
    fn render_layer(
        &mut self,
        size: ImageSize,
        draw: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> PicframeResult<()>,
    ) -> PicframeResult<Vec<u8>> {
        let (width, height) = pixmap_dims(size)?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());

        draw(self, &mut ctx)?;
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }
}

fn pixmap_dims(size: ImageSize) -> PicframeResult<(u16, u16)> {
    let w: u16 = size.width.try_into().map_err(|_| {
        PicframeError::validation(format!("image width {} exceeds u16", size.width))
    })?;
    let h: u16 = size.height.try_into().map_err(|_| {
        PicframeError::validation(format!("image height {} exceeds u16", size.height))
    })?;
    Ok((w, h))
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
