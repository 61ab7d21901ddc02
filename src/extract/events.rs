use std::path::PathBuf;

/// Progress signals raised while extracting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractEvent {
    /// Every sprite of a texture sheet has been attempted
    TextureProcessed { path: PathBuf },
    /// Every element of a texture array has been attempted
    TextureArrayProcessed { name: String },
    /// One sprite or array element was written
    SpriteProcessed { name: String },
    /// Every sprite of an atlas has been attempted
    AtlasProcessed { name: String },
    /// An output file was written
    FileWritten { path: PathBuf },
}

/// Receives [`ExtractEvent`]s. Passed into each extraction call.
pub trait ExtractObserver {
    fn notify(&mut self, event: &ExtractEvent);
}

impl<F> ExtractObserver for F
where
    F: FnMut(&ExtractEvent),
{
    fn notify(&mut self, event: &ExtractEvent) {
        self(event)
    }
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreEvents;

impl ExtractObserver for IgnoreEvents {
    fn notify(&mut self, _event: &ExtractEvent) {}
}

/// Records every event, in order.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<ExtractEvent>,
}

impl ExtractObserver for EventLog {
    fn notify(&mut self, event: &ExtractEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer() {
        let mut written = Vec::new();
        {
            let mut observer = |event: &ExtractEvent| {
                if let ExtractEvent::FileWritten { path } = event {
                    written.push(path.clone());
                }
            };
            observer.notify(&ExtractEvent::FileWritten {
                path: PathBuf::from("a.png"),
            });
            observer.notify(&ExtractEvent::SpriteProcessed {
                name: "a".to_string(),
            });
        }
        assert_eq!(written, vec![PathBuf::from("a.png")]);
    }

    #[test]
    fn test_event_log() {
        let mut log = EventLog::default();
        log.notify(&ExtractEvent::AtlasProcessed {
            name: "ui".to_string(),
        });
        assert_eq!(log.events.len(), 1);
    }
}
