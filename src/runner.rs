use std::io;
use std::time::Duration;

use crate::desk::DeskApp;
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};

/// Drive `app` until it asks to quit or the input driver fails.
///
/// Every loop turn starts with a tick: queued panel notifications are
/// applied, animations advance and a frame is drawn. Input that arrived
/// during the poll is then dispatched in one burst.
pub fn run_desk<D, O>(
    app: &mut DeskApp,
    input: D,
    output: &mut O,
    tick_interval: Duration,
) -> io::Result<()>
where
    D: InputDriver,
    O: OutputDriver,
{
    let mut event_loop = EventLoop::new(input, tick_interval);
    event_loop.driver().set_mouse_capture(true)?;

    let result = event_loop.run(|_driver, event| {
        let Some(event) = event else {
            app.tick();
            output.draw(|frame| app.render(frame))?;
            if app.take_bell() {
                output.bell()?;
            }
            return Ok(ControlFlow::Continue);
        };
        Ok(app.handle_event(&event))
    });

    let _ = event_loop.driver().set_mouse_capture(false);
    result
}
