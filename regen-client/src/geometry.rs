//! # Panel Geometry
//!
//! Drag-to-resize for the two stacked panels of the workbench: the generated
//! code output and the terminal. Each panel has its own resizer; the layout
//! makes sure only one divider is being dragged at a time.
//!
//! A resizer is a two-state machine (`Idle`, `Resizing`) driven by three
//! events: `drag_start`, `drag_move` and `drag_end`. No I/O happens here.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Vertical extent of the container the panels live in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Size constraints and starting heights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Smallest height a panel may be dragged to
    pub min_height: f64,
    /// Container space that must stay visible above a panel
    pub reserved_height: f64,
    pub generator_output_height: f64,
    pub terminal_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_height: 180.0,
            reserved_height: 120.0,
            generator_output_height: 280.0,
            terminal_height: 200.0,
        }
    }
}

/// The two draggable dividers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Divider {
    GeneratorOutput,
    Terminal,
}

/// Layout-wide drag state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Resizing(Divider),
}

/// Height and drag state of a single panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelResizer {
    height: f64,
    min_height: f64,
    reserved_height: f64,
    active: bool,
}

impl PanelResizer {
    pub fn new(height: f64, min_height: f64, reserved_height: f64) -> Self {
        Self {
            height,
            min_height,
            reserved_height,
            active: false,
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn drag_start(&mut self) {
        self.active = true;
    }

    /// Recompute the height for a pointer position.
    ///
    /// Returns the published height, or None when idle, the pointer is not a
    /// finite number, or the clamped height did not change.
    pub fn drag_move(&mut self, pointer_y: f64, container: Bounds) -> Option<f64> {
        if !self.active || !pointer_y.is_finite() {
            return None;
        }
        let next = self.clamp(container.bottom() - pointer_y, container);
        if next == self.height {
            return None;
        }
        self.height = next;
        Some(next)
    }

    /// Leaves resizing mode no matter where the pointer was released
    pub fn drag_end(&mut self) {
        self.active = false;
    }

    /// Pull the height back inside the range allowed by `container`
    pub fn refit(&mut self, container: Bounds) {
        self.height = self.clamp(self.height, container);
    }

    /// `[min_height, container.height - reserved_height]`, where the upper
    /// bound never drops below the minimum
    fn clamp(&self, height: f64, container: Bounds) -> f64 {
        let max = (container.height - self.reserved_height).max(self.min_height);
        height.clamp(self.min_height, max)
    }
}

/// Geometry of both panels inside their container
#[derive(Debug, Clone, PartialEq)]
pub struct PanelGeometry {
    generator_output: PanelResizer,
    terminal: PanelResizer,
    container: Bounds,
}

impl PanelGeometry {
    pub fn new(config: LayoutConfig, container: Bounds) -> Self {
        let mut geometry = Self {
            generator_output: PanelResizer::new(
                config.generator_output_height,
                config.min_height,
                config.reserved_height,
            ),
            terminal: PanelResizer::new(
                config.terminal_height,
                config.min_height,
                config.reserved_height,
            ),
            container,
        };
        geometry.generator_output.refit(container);
        geometry.terminal.refit(container);
        geometry
    }

    pub fn generator_output_height(&self) -> f64 {
        self.generator_output.height()
    }

    pub fn terminal_height(&self) -> f64 {
        self.terminal.height()
    }

    pub fn container_bounds(&self) -> Bounds {
        self.container
    }

    pub fn state(&self) -> DragState {
        if self.generator_output.is_active() {
            DragState::Resizing(Divider::GeneratorOutput)
        } else if self.terminal.is_active() {
            DragState::Resizing(Divider::Terminal)
        } else {
            DragState::Idle
        }
    }

    /// Begin dragging `divider`; refused while another divider is active
    pub fn drag_start(&mut self, divider: Divider) -> bool {
        match self.state() {
            DragState::Resizing(active) if active != divider => {
                debug!(?divider, ?active, "ignoring drag start, another divider is active");
                false
            }
            _ => {
                self.panel_mut(divider).drag_start();
                true
            }
        }
    }

    /// Feed a pointer move to the active divider, if any
    pub fn drag_move(&mut self, pointer_y: f64) -> Option<(Divider, f64)> {
        let DragState::Resizing(divider) = self.state() else {
            return None;
        };
        let container = self.container;
        self.panel_mut(divider)
            .drag_move(pointer_y, container)
            .map(|height| (divider, height))
    }

    /// Pointer released anywhere: every divider goes idle
    pub fn drag_end(&mut self) {
        self.generator_output.drag_end();
        self.terminal.drag_end();
    }

    /// The container was resized; re-clamp both panels
    pub fn set_container(&mut self, container: Bounds) {
        self.container = container;
        self.generator_output.refit(container);
        self.terminal.refit(container);
    }

    fn panel_mut(&mut self, divider: Divider) -> &mut PanelResizer {
        match divider {
            Divider::GeneratorOutput => &mut self.generator_output,
            Divider::Terminal => &mut self.terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> PanelGeometry {
        PanelGeometry::new(LayoutConfig::default(), Bounds::new(0.0, 800.0))
    }

    #[test]
    fn test_drag_clamps_to_minimum() {
        let mut geo = geometry();
        assert_eq!(geo.generator_output_height(), 280.0);

        assert!(geo.drag_start(Divider::GeneratorOutput));
        // bottom 800 - pointer 750 = 50, below the minimum
        assert_eq!(geo.drag_move(750.0), Some((Divider::GeneratorOutput, 180.0)));
        assert_eq!(geo.generator_output_height(), 180.0);

        // past the bottom edge would be negative
        assert_eq!(geo.drag_move(900.0), None);
        assert_eq!(geo.generator_output_height(), 180.0);
    }

    #[test]
    fn test_drag_clamps_to_container_minus_reserved() {
        let mut geo = geometry();
        geo.drag_start(Divider::Terminal);
        assert_eq!(geo.drag_move(0.0), Some((Divider::Terminal, 680.0)));
        assert_eq!(geo.drag_move(400.0), Some((Divider::Terminal, 400.0)));
        assert_eq!(geo.generator_output_height(), 280.0);
    }

    #[test]
    fn test_drag_end_always_clears_active_state() {
        let mut geo = geometry();
        geo.drag_start(Divider::Terminal);
        geo.drag_move(500.0);
        // released far outside the divider and the container
        geo.drag_end();
        assert_eq!(geo.state(), DragState::Idle);
        assert_eq!(geo.drag_move(100.0), None);
        assert_eq!(geo.terminal_height(), 300.0);
    }

    #[test]
    fn test_only_one_divider_at_a_time() {
        let mut geo = geometry();
        assert!(geo.drag_start(Divider::GeneratorOutput));
        assert!(!geo.drag_start(Divider::Terminal));
        assert_eq!(geo.state(), DragState::Resizing(Divider::GeneratorOutput));

        geo.drag_move(300.0);
        assert_eq!(geo.terminal_height(), 200.0);
        assert_eq!(geo.generator_output_height(), 500.0);
    }

    #[test]
    fn test_moves_without_drag_start_are_ignored() {
        let mut geo = geometry();
        assert_eq!(geo.drag_move(300.0), None);
        assert_eq!(geo.generator_output_height(), 280.0);
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let mut panel = PanelResizer::new(280.0, 180.0, 120.0);
        panel.drag_start();
        assert_eq!(panel.drag_move(f64::NAN, Bounds::new(0.0, 800.0)), None);
        assert_eq!(panel.height(), 280.0);
    }

    #[test]
    fn test_container_offset_is_respected() {
        let mut geo = PanelGeometry::new(LayoutConfig::default(), Bounds::new(100.0, 800.0));
        geo.drag_start(Divider::Terminal);
        assert_eq!(geo.drag_move(600.0), Some((Divider::Terminal, 300.0)));
    }

    #[test]
    fn test_shrinking_container_refits_heights() {
        let mut geo = geometry();
        geo.drag_start(Divider::GeneratorOutput);
        geo.drag_move(200.0);
        geo.drag_end();
        assert_eq!(geo.generator_output_height(), 600.0);

        geo.set_container(Bounds::new(0.0, 400.0));
        assert_eq!(geo.generator_output_height(), 280.0);
        assert_eq!(geo.terminal_height(), 200.0);

        // too small for the reserve: the minimum still wins
        geo.set_container(Bounds::new(0.0, 150.0));
        assert_eq!(geo.generator_output_height(), 180.0);
    }
}
