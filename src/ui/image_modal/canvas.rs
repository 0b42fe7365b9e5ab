// SPDX-License-Identifier: MPL-2.0
//! Canvas program drawing the viewer image at its animated transform.

use crate::domain::viewport::{ImageTransform, Vector2};
use iced::widget::canvas;
use iced::widget::image::Handle;
use iced::{mouse, Point, Rectangle, Size, Theme};

/// Draws `handle` centered in the canvas, scaled and shifted by `transform`.
#[derive(Debug, Clone)]
pub struct ImageCanvas {
    pub handle: Handle,
    pub natural: Vector2,
    pub transform: ImageTransform,
    pub opacity: f32,
}

impl<Message> canvas::Program<Message> for ImageCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        if self.opacity > 0.0 {
            let placement = self
                .transform
                .placement(self.natural, Vector2::new(bounds.width, bounds.height));
            frame.draw_image(
                Rectangle::new(
                    Point::new(placement.origin.x, placement.origin.y),
                    Size::new(placement.size.x, placement.size.y),
                ),
                canvas::Image::new(self.handle.clone()).opacity(self.opacity),
            );
        }

        vec![frame.into_geometry()]
    }
}
