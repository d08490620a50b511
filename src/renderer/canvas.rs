//! Canvas 2D backend
//!
//! Executes a draw list on a `CanvasRenderingContext2d`. No game logic here.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::DrawCmd;
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Size the canvas to the playfield and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(PLAYFIELD_WIDTH as u32);
        canvas.set_height(PLAYFIELD_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self { ctx })
    }

    pub fn draw(&self, cmds: &[DrawCmd]) {
        for cmd in cmds {
            if let Err(e) = self.draw_one(cmd) {
                log::warn!("Draw error: {:?}", e);
            }
        }
    }

    fn draw_one(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Clear => {
                ctx.clear_rect(0.0, 0.0, PLAYFIELD_WIDTH as f64, PLAYFIELD_HEIGHT as f64);
            }
            DrawCmd::FillRect { rect, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(
                    rect.min.x as f64,
                    rect.min.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
            DrawCmd::StrokeRect { rect, color } => {
                ctx.set_stroke_style_str(color);
                ctx.stroke_rect(
                    rect.min.x as f64,
                    rect.min.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
            DrawCmd::FillCircle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCmd::Text {
                text,
                pos,
                font,
                align,
                color,
            } => {
                ctx.set_fill_style_str(color);
                ctx.set_font(font);
                ctx.set_text_align(align.as_str());
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }
}
