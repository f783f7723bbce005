use self::viewer::Viewer;

mod viewer;
mod widgets;

/// Hands a terminal viewer to `f`, restoring the terminal afterwards.
///
/// A terminal failure during the run is reported once the screen is back.
pub fn watch<F, T>(fps: u32, f: F) -> T
where
    F: FnOnce(&mut Viewer<'_>) -> T,
{
    let (value, error) = ratatui::run(|terminal| {
        let mut viewer = Viewer::new(terminal, fps);
        let value = f(&mut viewer);
        (value, viewer.into_error())
    });
    if let Some(err) = error {
        eprintln!("Viewer stopped drawing: {err}");
    }
    value
}
