//! JSON-lines rendering surface.
//!
//! Writes one record per rendered frame: the projection parameters, the
//! marker, and where each serviced location lands on screen.

use std::io::Write;

use glam::DVec2;
use serde::Serialize;
use tracing::warn;

use globeflight_core::enums::Locale;
use globeflight_core::labels::label;
use globeflight_core::state::{MarkerView, ProjectionParameters, RenderFrame};
use globeflight_core::{AnimationPhase, GeoCoordinate, LocationId};
use globeflight_engine::RenderSurface;
use globeflight_geo::{BlendedProjection, GeometryProvider};

#[derive(Debug, Serialize)]
struct FrameRecord<'a> {
    frame: u64,
    phase: AnimationPhase,
    params: &'a ProjectionParameters,
    marker: Option<MarkerView>,
    locations: Vec<LocationRecord>,
}

#[derive(Debug, Serialize)]
struct LocationRecord {
    location: LocationId,
    label: &'static str,
    screen: DVec2,
    visible: bool,
}

pub struct JsonLinesSurface<W: Write> {
    writer: W,
    locale: Locale,
    centroids: Vec<(LocationId, GeoCoordinate)>,
    params: Option<ProjectionParameters>,
    frames: u64,
    write_failed: bool,
}

impl<W: Write> JsonLinesSurface<W> {
    /// Resolve every serviced location once through `geometry`; locations
    /// without a centroid are left out of the records.
    pub fn new(writer: W, geometry: &dyn GeometryProvider, locale: Locale) -> Self {
        let centroids = LocationId::ALL
            .iter()
            .filter_map(|&id| geometry.centroid_of(id).map(|c| (id, c)))
            .collect();
        Self {
            writer,
            locale,
            centroids,
            params: None,
            frames: 0,
            write_failed: false,
        }
    }

    pub fn frames_written(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, record: &FrameRecord<'_>) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> RenderSurface for JsonLinesSurface<W> {
    fn set_projection_parameters(&mut self, params: &ProjectionParameters) {
        self.params = Some(*params);
    }

    fn render_frame(&mut self, frame: &RenderFrame) {
        let Some(params) = self.params else {
            return;
        };
        let projection = BlendedProjection::from_parameters(&params);
        let locations = self
            .centroids
            .iter()
            .map(|&(location, coord)| LocationRecord {
                location,
                label: label(location, self.locale),
                screen: projection.project(coord),
                visible: projection.is_visible(coord),
            })
            .collect();

        let record = FrameRecord {
            frame: self.frames,
            phase: frame.phase,
            params: &params,
            marker: frame.marker,
            locations,
        };
        match self.write_record(&record) {
            Ok(()) => self.frames += 1,
            Err(e) => {
                // Keep animating; report the broken output once.
                if !self.write_failed {
                    warn!(error = %e, "frame output failed");
                    self.write_failed = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globeflight_core::types::{Rotation, Viewport};
    use globeflight_geo::StaticCentroids;

    fn flat() -> ProjectionParameters {
        let vp = Viewport::default();
        ProjectionParameters {
            scale: vp.width / 6.5,
            rotation: Rotation::IDENTITY,
            clip_angle: 179.999,
            translate: vp.center(),
            morph: 0.0,
        }
    }

    #[test]
    fn test_writes_one_line_per_frame() {
        let mut surface = JsonLinesSurface::new(Vec::new(), &StaticCentroids, Locale::English);
        surface.set_projection_parameters(&flat());
        let frame = RenderFrame {
            phase: AnimationPhase::Idle,
            marker: None,
        };
        surface.render_frame(&frame);
        surface.render_frame(&frame);
        assert_eq!(surface.frames_written(), 2);

        let out = String::from_utf8(surface.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let record: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(record["frame"], 1);
        assert_eq!(record["phase"], "Idle");
        let locations = record["locations"].as_array().unwrap();
        assert_eq!(locations.len(), LocationId::ALL.len());
        assert!(locations.iter().all(|l| l["visible"] == true));
    }

    #[test]
    fn test_globe_hides_far_side() {
        let geometry = StaticCentroids;
        let mut surface = JsonLinesSurface::new(Vec::new(), &geometry, Locale::Korean);
        let korea = geometry.centroid_of(LocationId::Korea).unwrap();
        let params = ProjectionParameters {
            rotation: Rotation::centering(korea),
            clip_angle: 90.0,
            morph: 1.0,
            ..flat()
        };
        surface.set_projection_parameters(&params);
        surface.render_frame(&RenderFrame {
            phase: AnimationPhase::Flying,
            marker: None,
        });

        let out = String::from_utf8(surface.into_inner()).unwrap();
        let record: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        let find = |code: &str| {
            record["locations"]
                .as_array()
                .unwrap()
                .iter()
                .find(|l| l["location"] == code)
                .cloned()
                .unwrap()
        };
        assert_eq!(find("JP")["visible"], true);
        assert_eq!(find("US")["visible"], false);
        assert_eq!(find("KR")["label"], "대한민국");
    }

    #[test]
    fn test_no_output_before_parameters() {
        let mut surface = JsonLinesSurface::new(Vec::new(), &StaticCentroids, Locale::English);
        surface.render_frame(&RenderFrame {
            phase: AnimationPhase::Idle,
            marker: None,
        });
        assert!(surface.into_inner().is_empty());
    }
}
