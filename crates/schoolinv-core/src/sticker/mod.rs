//! QR sticker layout for 50×25 mm labels, emitted as TSPL commands.
//!
//! The label carries a QR code that deep-links to the asset page, a fixed
//! `AULA` caption, the template name (at most two lines) and the last
//! characters of the asset id. All positions are in dots (203 dpi) and were
//! tuned on the physical labels: keep them as they are.
//!
//! Overlong text is truncated silently; nothing here can fail.

mod wrap;

pub use wrap::{wrap, FontTier, MAX_LINES};

use crate::models::Asset;

const CAPTION: &str = "AULA";

const QR_X: u32 = 16;
const QR_Y: u32 = 16;
const QR_CELL_WIDTH: u32 = 4;

const TEXT_X: u32 = 170;
const CAPTION_Y: u32 = 20;
/// Space between the caption block and the name block.
const BLOCK_GAP: u32 = 8;

/// ID line Y by combined caption + name line count: ≤1, 2, ≥3.
const ID_Y_SINGLE: u32 = 120;
const ID_Y_DOUBLE: u32 = 150;
const ID_Y_MULTI: u32 = 175;

const ID_SUFFIX_LEN: usize = 8;

const PREAMBLE: &[&str] = &[
    "SIZE 50 mm,25 mm",
    "GAP 2 mm,0 mm",
    "DIRECTION 1",
    "DENSITY 8",
    "CLS",
];

/// One `TEXT` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub x: u32,
    pub y: u32,
    pub tier: FontTier,
    pub text: String,
}

/// Positioned content of one label, before serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerLayout {
    pub qr_payload: String,
    pub caption: Vec<TextLine>,
    pub name: Vec<TextLine>,
    pub id_line: TextLine,
}

/// Lays out a text block starting at `y`; returns the lines and the Y just below them.
fn layout_block(text: &str, y: u32) -> (Vec<TextLine>, u32) {
    let text = text.trim();
    let tier = FontTier::for_text(text);
    let mut next_y = y;
    let lines = wrap(text, tier.line_budget())
        .into_iter()
        .map(|line| {
            let out = TextLine {
                x: TEXT_X,
                y: next_y,
                tier,
                text: line,
            };
            next_y += tier.line_advance();
            out
        })
        .collect();
    (lines, next_y)
}

fn id_line_y(lines_above: usize) -> u32 {
    match lines_above {
        0 | 1 => ID_Y_SINGLE,
        2 => ID_Y_DOUBLE,
        _ => ID_Y_MULTI,
    }
}

/// Last [`ID_SUFFIX_LEN`] characters of `id`, or all of it when shorter.
pub fn id_suffix(id: &str) -> &str {
    let count = id.chars().count();
    if count <= ID_SUFFIX_LEN {
        return id;
    }
    let start = id
        .char_indices()
        .nth(count - ID_SUFFIX_LEN)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &id[start..]
}

impl StickerLayout {
    pub fn new(id: &str, name: &str, qr_payload: &str) -> Self {
        let (caption, after_caption) = layout_block(CAPTION, CAPTION_Y);
        let (name_lines, _) = layout_block(name, after_caption + BLOCK_GAP);
        let id_line = TextLine {
            x: TEXT_X,
            y: id_line_y(caption.len() + name_lines.len()),
            tier: FontTier::SMALL,
            text: format!("ID: {}", id_suffix(id)),
        };
        Self {
            qr_payload: qr_payload.to_string(),
            caption,
            name: name_lines,
            id_line,
        }
    }

    /// Layout for `asset`, with the QR code pointing at `{app_base_url}/assets/{id}`.
    pub fn for_asset(asset: &Asset, app_base_url: &str) -> Self {
        Self::new(
            &asset.id.to_string(),
            asset.name(),
            &asset.detail_url(app_base_url),
        )
    }

    /// Every `TEXT` line in print order.
    pub fn text_lines(&self) -> impl Iterator<Item = &TextLine> {
        self.caption
            .iter()
            .chain(self.name.iter())
            .chain(std::iter::once(&self.id_line))
    }

    pub fn to_tspl(&self) -> String {
        let mut out = String::with_capacity(512);
        for cmd in PREAMBLE {
            push_line(&mut out, cmd);
        }
        push_line(
            &mut out,
            &format!(
                "QRCODE {},{},L,{},A,0,\"{}\"",
                QR_X,
                QR_Y,
                QR_CELL_WIDTH,
                escape(&self.qr_payload)
            ),
        );
        for line in self.text_lines() {
            push_line(
                &mut out,
                &format!(
                    "TEXT {},{},\"{}\",0,1,1,\"{}\"",
                    line.x,
                    line.y,
                    line.tier.font(),
                    escape(&line.text)
                ),
            );
        }
        push_line(&mut out, "PRINT 1");
        out
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str("\r\n");
}

/// TSPL strings cannot contain a bare `"`; it is written as `\["]`.
fn escape(text: &str) -> String {
    text.replace('"', "\\[\"]")
}

/// TSPL commands for one asset sticker.
pub fn render_asset(asset: &Asset, app_base_url: &str) -> String {
    StickerLayout::for_asset(asset, app_base_url).to_tspl()
}
