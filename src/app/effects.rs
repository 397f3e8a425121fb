use crate::app::{App, Message, Model, ToastLevel};

impl App {
    /// Run the I/O a message asks for once the model has been updated.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if let Message::Save = msg {
            match model.save_to_disk() {
                Ok(path) => {
                    model.show_toast(ToastLevel::Info, format!("Saved {}", path.display()));
                    if model.quit_confirmed {
                        model.should_quit = true;
                    }
                }
                Err(err) => {
                    tracing::error!("save failed: {err:#}");
                    model.show_toast(ToastLevel::Error, format!("Save failed: {err:#}"));
                }
            }
        }
    }
}
