//! A static grid behind five nested triangles spinning at different speeds.

use trigon_layers::prelude::*;

const SIZE: f32 = 500.0;
const CENTER: f32 = SIZE / 2.0;

fn main() {
    Stage::new()
        .title("trigon")
        .size(SIZE as f64, SIZE as f64)
        .canvas("#background-layer", SIZE, SIZE)
        .canvas("#game-layer", SIZE, SIZE)
        .run(|host, frames| {
            let mut background = Layer::new(host, "#background-layer", false);
            background.add_object(Grid::new(GridConfig::default()), 0.0, 0.0);
            background.render(frames);

            let mut game = Layer::new(host, "#game-layer", true);
            for triangle in triangles() {
                game.add_object(triangle, CENTER, CENTER);
            }
            game.render(frames);

            log::debug!("{} triangles on `#game-layer`", game.len());
            vec![background, game]
        })
}

/// Largest first, each half the size of the previous and turning faster,
/// alternating direction.
fn triangles() -> Vec<Triangle> {
    [
        (200.0, 0.0, 0.25, true),
        (100.0, 180.0, -1.0, false),
        (50.0, 0.0, 1.0, false),
        (25.0, 180.0, -2.0, false),
        (12.5, 0.0, 3.0, false),
    ]
    .into_iter()
    .map(|(radius, angle, rotation_speed, show_guides)| {
        Triangle::new(TriangleConfig {
            radius,
            angle,
            rotation_speed,
            show_guides,
            ..Default::default()
        })
    })
    .collect()
}
