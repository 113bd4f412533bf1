//! Display abstraction for the rowing readouts.
//!
//! This module defines the [`RowerDisplay`] trait for rendering the two
//! scalar readouts (stroke rate and velocity) to a physical screen. Rendering
//! itself is an external collaborator; the core's only coupling is this
//! trait.

/// Display trait for rendering the rowing readouts.
///
/// Implementors provide hardware-specific rendering for panels like an
/// ST7789 TFT, character LCDs, or simulated displays for testing.
///
/// # Example
///
/// ```ignore
/// use bluerow::traits::RowerDisplay;
///
/// struct MyDisplay { /* ... */ }
///
/// impl RowerDisplay for MyDisplay {
///     type Error = ();
///
///     fn init(&mut self) -> Result<(), ()> { Ok(()) }
///     fn clear(&mut self) -> Result<(), ()> { Ok(()) }
///     fn render(&mut self, stroke_rate_spm: f32, velocity_mps: f32) -> Result<(), ()> {
///         // Draw the two readouts...
///         Ok(())
///     }
///     fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), ()> {
///         Ok(())
///     }
/// }
/// ```
pub trait RowerDisplay {
    /// Error type for display operations.
    type Error;

    /// Initializes the display hardware.
    ///
    /// Called once at startup. Implementations should configure the panel,
    /// clear the screen, and show any splash content.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Clears the display.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Renders the current readouts.
    ///
    /// Called each display update cycle with the smoothed stroke rate in
    /// strokes/minute and the smoothed velocity in m/s. These two scalars are
    /// the display's entire coupling to the core.
    fn render(&mut self, stroke_rate_spm: f32, velocity_mps: f32) -> Result<(), Self::Error>;

    /// Shows a simple message (e.g., for startup or errors).
    ///
    /// # Arguments
    ///
    /// * `line1` - First line of text
    /// * `line2` - Optional second line of text
    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), Self::Error>;
}
