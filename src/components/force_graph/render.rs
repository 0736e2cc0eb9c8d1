use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_RADIUS};
use crate::config::Palette;

pub fn render(state: &ForceGraphState, palette: &Palette, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#f7f7fb");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let view = state.viewport;
	let _ = ctx.translate(view.x, view.y);
	let _ = ctx.scale(view.k, view.k);
	draw_edges(state, palette, ctx);
	draw_nodes(state, palette, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, palette: &Palette, ctx: &CanvasRenderingContext2d) {
	let k = state.viewport.k;
	let arrow_size = 8.0 / k;
	let positions = state.positions();

	for (src, tgt, link) in &state.links {
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(src), positions.get(tgt)) else {
			continue;
		};
		let color = link.color.as_deref().unwrap_or(&palette.edge);
		let highlighted = link.color.is_some();
		ctx.set_stroke_style_str(color);
		ctx.set_fill_style_str(color);
		ctx.set_line_width(if highlighted { 3.0 / k } else { 1.5 / k });

		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			// self-loop
			ctx.begin_path();
			let _ = ctx.arc(x1, y1 - NODE_RADIUS, NODE_RADIUS * 0.8, 0.0, 2.0 * PI);
			ctx.stroke();
			draw_label(ctx, &link.label, x1, y1 - 2.2 * NODE_RADIUS, k);
			continue;
		}

		let (ux, uy) = (dx / dist, dy / dist);
		let head = if state.directed { NODE_RADIUS + arrow_size } else { NODE_RADIUS };
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(x2 - ux * head, y2 - uy * head);
		ctx.stroke();

		if state.directed {
			let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
			let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
			let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}

		// offset the weight label off the line
		let (mx, my) = ((x1 + x2) / 2.0 - uy * 8.0, (y1 + y2) / 2.0 + ux * 8.0);
		draw_label(ctx, &link.label, mx, my, k);
	}
}

fn draw_label(ctx: &CanvasRenderingContext2d, text: &str, x: f64, y: f64, k: f64) {
	ctx.set_fill_style_str("#333");
	ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
	let _ = ctx.fill_text(text, x, y);
}

fn draw_nodes(state: &ForceGraphState, palette: &Palette, ctx: &CanvasRenderingContext2d) {
	let k = state.viewport.k;

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;

		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(info.color.as_deref().unwrap_or(&palette.node));
		ctx.fill();
		ctx.set_stroke_style_str("#000");
		ctx.set_line_width(1.0 / k);
		ctx.stroke();

		ctx.set_fill_style_str("white");
		ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
		let _ = ctx.fill_text(&info.id, x - 3.0 * info.id.len() as f64, y + 3.0);

		ctx.set_fill_style_str("#333");
		let _ = ctx.fill_text(&info.label, x + NODE_RADIUS + 3.0, y - NODE_RADIUS);
	});
}
