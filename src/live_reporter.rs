//! Live progress display while a benchmark runs.
//!
//! Purely observational: nothing here feeds back into the run statistics, and
//! a run without a reporter produces identical results.

use crate::classification::class_name;
use crate::console::Console;
use crate::dataset::{CifarRecord, IMAGE_WIDTH, PIXELS_PER_CHANNEL};
use crate::errors::BenchmarkResult;
use log::warn;
use std::io::Write;
use std::ops::{Deref, DerefMut};

/// Glyphs cycled by the progress indicator.
pub const PROGRESS_GLYPHS: [char; 4] = ['-', '\\', '|', '/'];

/// Default number of images between two previews.
pub const DEFAULT_PREVIEW_INTERVAL: usize = 100;

const CORRECT_COLOR: (u8, u8, u8) = (0, 255, 0);
const INCORRECT_COLOR: (u8, u8, u8) = (255, 0, 0);

/// Renders progress, image previews and classification verdicts to a console.
pub struct LiveReporter<C: Console> {
    console: C,
    preview_interval: usize,
    class_names: Vec<String>,
}

impl<C: Console> LiveReporter<C> {
    pub fn new(console: C, preview_interval: usize, class_names: Vec<String>) -> Self {
        Self {
            console,
            preview_interval: preview_interval.max(1),
            class_names,
        }
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Clears the screen and returns a guard that restores it when dropped,
    /// whether the run succeeds or fails.
    pub fn session(&mut self) -> BenchmarkResult<ReportSession<'_, C>> {
        self.console.clear_screen()?;
        self.console.flush()?;
        Ok(ReportSession { reporter: self })
    }

    /// Whether image `index` gets a full preview.
    pub fn is_preview_frame(&self, index: usize) -> bool {
        index % self.preview_interval == 0
    }

    /// Rewrites the progress line with the instantaneous frame rate of one image.
    pub fn report_progress(&mut self, index: usize, seconds: f64) -> BenchmarkResult<()> {
        let fps = if seconds > 0.0 { 1.0 / seconds } else { 0.0 };
        self.console.set_cursor_position(1, 1)?;
        writeln!(
            self.console,
            "{:06}: {:.2} fps {}",
            index,
            fps,
            PROGRESS_GLYPHS[index % PROGRESS_GLYPHS.len()]
        )?;
        self.console.flush()?;
        Ok(())
    }

    /// Draws the image one cell per pixel, the output dump produced by
    /// `print_result`, and the verdict line colored by correctness.
    pub fn render_preview<F>(
        &mut self,
        record: &CifarRecord<'_>,
        predicted: usize,
        print_result: F,
    ) -> BenchmarkResult<()>
    where
        F: FnOnce(&mut dyn Write) -> BenchmarkResult<()>,
    {
        write!(self.console, "\nImage:")?;
        for j in 0..PIXELS_PER_CHANNEL {
            let [r, g, b] = record.pixel(j);
            self.console.set_background_color(r, g, b)?;
            if j % IMAGE_WIDTH == 0 {
                writeln!(self.console)?;
            }
            write!(self.console, "  ")?;
        }
        writeln!(self.console)?;
        self.console.reset_background_color()?;

        writeln!(self.console, "\nResult:")?;
        print_result(&mut self.console)?;

        let expected = record.label();
        let (r, g, b) = if predicted == expected {
            CORRECT_COLOR
        } else {
            INCORRECT_COLOR
        };
        self.console.set_foreground_color(r, g, b)?;
        writeln!(
            self.console,
            "CIFAR expected class = {}, actual class = {}         ",
            class_name(&self.class_names, expected),
            class_name(&self.class_names, predicted)
        )?;
        self.console.reset_foreground_color()?;
        self.console.flush()?;
        Ok(())
    }

    /// Clears the screen and homes the cursor.
    pub fn finish(&mut self) -> BenchmarkResult<()> {
        self.console.clear_screen()?;
        self.console.set_cursor_position(1, 1)?;
        self.console.flush()?;
        Ok(())
    }
}

/// Active reporting scope; restores the screen on drop.
pub struct ReportSession<'a, C: Console> {
    reporter: &'a mut LiveReporter<C>,
}

impl<C: Console> Deref for ReportSession<'_, C> {
    type Target = LiveReporter<C>;

    fn deref(&self) -> &Self::Target {
        self.reporter
    }
}

impl<C: Console> DerefMut for ReportSession<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.reporter
    }
}

impl<C: Console> Drop for ReportSession<'_, C> {
    fn drop(&mut self) {
        if let Err(e) = self.reporter.finish() {
            warn!("Failed to restore the console after reporting: {}", e);
        }
    }
}
