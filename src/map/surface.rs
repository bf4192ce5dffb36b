use std::sync::Mutex;

use super::command::MapCommand;
use crate::error::{map_initialization_error, Error};

/// The rendering side of the map. Implementations apply commands in order.
pub trait MapSurface {
    fn initialize(&self, style_url: &str) -> Result<(), Error>;
    fn apply(&self, command: MapCommand);
}

/// Buffers commands until the front-end drains them.
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Mutex<Vec<MapCommand>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<MapCommand> {
        let mut commands = self.commands.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *commands)
    }

    pub fn len(&self) -> usize {
        self.commands.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MapSurface for CommandQueue {
    fn initialize(&self, style_url: &str) -> Result<(), Error> {
        let url = reqwest::Url::parse(style_url)
            .map_err(|err| map_initialization_error(format!("invalid map style url: {}", err)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(map_initialization_error(format!(
                "unsupported map style scheme: {}",
                url.scheme()
            )));
        }

        self.apply(MapCommand::SetStyle { url: url.into() });

        Ok(())
    }

    fn apply(&self, command: MapCommand) {
        self.commands
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(command);
    }
}
