//! Console collaborators: every request becomes a line on stdout.

use std::io::{self, Write};

use roulette_core::{
    AudioSink, Face, FaceCounts, FaceStyle, HapticSink, MusicSink, PresentationSink,
    RouletteSnapshot, SinkResult, Track, VibrationPattern,
};

/// Big-glyph rendering of a face, matching the pips on a real die.
fn pips(face: Face) -> &'static str {
    match face.value() {
        1 => "⚀",
        2 => "⚁",
        3 => "⚂",
        4 => "⚃",
        5 => "⚄",
        _ => "⚅",
    }
}

/// Draws the game on stdout.
#[derive(Debug, Default)]
pub struct ConsoleScreen {
    /// A preview frame is on the current line and must be overwritten.
    preview_line: bool,
}

impl ConsoleScreen {
    fn line(&mut self, text: &str) {
        if self.preview_line {
            // Finish the preview line before printing anything else.
            println!();
            self.preview_line = false;
        }
        println!("{text}");
    }
}

impl PresentationSink for ConsoleScreen {
    fn show_preview(&mut self, face: Face) {
        print!("\r  rolling... {} {face} ", pips(face));
        if let Err(err) = io::stdout().flush() {
            tracing::debug!("stdout flush failed: {err}");
        }
        self.preview_line = true;
    }

    fn show_result(&mut self, face: Face, style: FaceStyle) {
        let text = match style {
            FaceStyle::Jackpot => format!("  ★★★ {} {face} ★★★  JACKPOT!", pips(face)),
            FaceStyle::Standard => format!("  ==> {} {face}", pips(face)),
        };
        self.line(&text);
    }

    fn show_history(&mut self, history: &[Face]) {
        let list: Vec<String> = history.iter().map(ToString::to_string).collect();
        self.line(&format!("  history: {}", list.join(" ")));
    }

    fn show_count(&mut self, face: Face, count: u64) {
        self.line(&format!("  count[{face}] = {count}"));
    }

    fn show_bonus(&mut self, text: &str) {
        self.line(&format!("  {text}"));
    }

    fn hide_bonus(&mut self) {
        tracing::debug!("Bonus banner hidden");
    }

    fn celebrate(&mut self, _face: Face) {
        self.line("  🎊 🎉 🎊 🎉 🎊 🎉 🎊 🎉 🎊 🎉");
    }
}

/// Names the sound cues instead of playing them.
#[derive(Debug, Default)]
pub struct ConsoleAudio;

impl AudioSink for ConsoleAudio {
    fn play_start(&mut self) -> SinkResult {
        tracing::debug!("♪ spin-start");
        Ok(())
    }

    fn start_spin_loop(&mut self) -> SinkResult {
        tracing::debug!("♪ spinning (loop)");
        Ok(())
    }

    fn stop_spin_loop(&mut self) -> SinkResult {
        tracing::debug!("♪ spinning stopped");
        Ok(())
    }

    fn play_result(&mut self, face: Face) -> SinkResult {
        tracing::debug!("♪ result-{face}");
        Ok(())
    }
}

/// Logs vibration patterns.
#[derive(Debug, Default)]
pub struct ConsoleHaptics;

impl HapticSink for ConsoleHaptics {
    fn vibrate(&mut self, pattern: &VibrationPattern) -> SinkResult {
        tracing::debug!("~ vibrate {pattern}");
        Ok(())
    }
}

/// Logs background music changes.
#[derive(Debug, Default)]
pub struct ConsoleMusic;

impl MusicSink for ConsoleMusic {
    fn play_track(&mut self, track: &Track) -> SinkResult {
        println!("  ♫ now playing: {} ({})", track.title, track.source);
        Ok(())
    }

    fn stop_track(&mut self) -> SinkResult {
        println!("  ♫ music stopped");
        Ok(())
    }
}

fn counts_table(counts: &FaceCounts) -> String {
    counts
        .iter()
        .map(|(face, count)| format!("{face}:{count}"))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Prints the `stats` panel.
pub fn print_stats(snapshot: &RouletteSnapshot) {
    let history: Vec<String> = snapshot.history.iter().map(ToString::to_string).collect();
    println!("┌─ STATS ─────────────────────────────────────────┐");
    println!("│ state:   {}", snapshot.state);
    println!("│ spins:   {}", snapshot.completed_spins);
    println!("│ history: {}", history.join(" "));
    println!("│ counts:  {}", counts_table(&snapshot.counts));
    println!("└─────────────────────────────────────────────────┘");
}
