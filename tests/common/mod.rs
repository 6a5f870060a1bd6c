//! Shared fakes for the resolver and session integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use voxctl::platform::{
    AdapterError, ApplicationCatalog, CatalogEntry, ProcessDirectory, TerminateError,
};
use voxctl::resolver::ResolutionEngine;
use voxctl::session::CommandProcessor;
use voxctl::voice::{Heard, InputSource, ListenWindow};
use voxctl::{AppIdentifier, AppName, ProcessDescriptor};

/// Every call that reached an adapter, in order
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Catalog with fixed entries; literal launches succeed for known programs
#[derive(Default)]
pub struct FakeCatalog {
    pub entries: Vec<CatalogEntry>,
    pub programs: Vec<String>,
    /// Listing installed applications fails as if the OS query broke
    pub unavailable: bool,
    pub calls: CallLog,
}

impl FakeCatalog {
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(id, name)| CatalogEntry::new(*id, *name))
                .collect(),
            ..Default::default()
        }
    }
}

impl ApplicationCatalog for FakeCatalog {
    fn installed_applications(&self) -> Result<Vec<CatalogEntry>, AdapterError> {
        self.calls.borrow_mut().push("list_apps".to_string());
        if self.unavailable {
            return Err(AdapterError::Unavailable("catalog query failed".to_string()));
        }
        Ok(self.entries.clone())
    }

    fn launch_by_identifier(&self, id: &AppIdentifier) -> Result<(), AdapterError> {
        self.calls.borrow_mut().push(format!("launch_id:{}", id));
        Ok(())
    }

    fn launch_literal(&self, program: &str) -> Result<(), AdapterError> {
        self.calls.borrow_mut().push(format!("launch:{}", program));
        if self.programs.iter().any(|p| p == program) {
            Ok(())
        } else {
            Err(AdapterError::NotFound(program.to_string()))
        }
    }
}

/// Process table that loses processes as they are terminated
#[derive(Default)]
pub struct FakeProcesses {
    pub table: RefCell<Vec<ProcessDescriptor>>,
    /// PIDs the OS refuses to terminate
    pub protected: Vec<u32>,
    /// Snapshots fail; the name-or-title fallback still works
    pub unavailable: bool,
    pub calls: CallLog,
}

impl FakeProcesses {
    pub fn running(processes: &[(u32, &str)]) -> Self {
        Self {
            table: RefCell::new(
                processes
                    .iter()
                    .map(|(pid, name)| ProcessDescriptor::new(*pid, *name))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    pub fn remaining(&self) -> Vec<u32> {
        self.table.borrow().iter().map(|p| p.pid).collect()
    }
}

impl ProcessDirectory for FakeProcesses {
    fn list_processes(&self) -> Result<Vec<ProcessDescriptor>, AdapterError> {
        self.calls.borrow_mut().push("list_processes".to_string());
        if self.unavailable {
            return Err(AdapterError::Unavailable("process table unreadable".to_string()));
        }
        Ok(self.table.borrow().clone())
    }

    fn terminate(&self, pid: u32) -> Result<(), TerminateError> {
        self.calls.borrow_mut().push(format!("terminate:{}", pid));
        if self.protected.contains(&pid) {
            return Err(TerminateError::PermissionDenied);
        }
        let mut table = self.table.borrow_mut();
        let before = table.len();
        table.retain(|p| p.pid != pid);
        if table.len() == before {
            Err(TerminateError::NotFound)
        } else {
            Ok(())
        }
    }

    fn terminate_by_name_or_title(&self, app: &AppName) -> Result<(), AdapterError> {
        self.calls.borrow_mut().push(format!("fallback:{}", app));
        let mut table = self.table.borrow_mut();
        let matches = |p: &ProcessDescriptor| {
            let title = p.window_title.as_deref().unwrap_or("");
            app.is_contained_in(&p.name) || app.is_contained_in(title)
        };
        let matched = table.iter().filter(|p| matches(p)).count();
        if matched == 0 {
            return Err(AdapterError::NotFound(app.to_string()));
        }
        table.retain(|p| !matches(p) || self.protected.contains(&p.pid));
        if table.iter().any(|p| matches(p)) {
            return Err(AdapterError::PermissionDenied(app.to_string()));
        }
        Ok(())
    }
}

/// Input source that replays a fixed script, then closes
pub struct ScriptedInput {
    script: VecDeque<Heard>,
    pub listens: Rc<RefCell<usize>>,
}

impl ScriptedInput {
    pub fn commands(commands: &[&str]) -> Self {
        Self::new(commands.iter().map(|c| Heard::Text(c.to_string())))
    }

    pub fn new(script: impl IntoIterator<Item = Heard>) -> Self {
        Self {
            script: script.into_iter().collect(),
            listens: Rc::new(RefCell::new(0)),
        }
    }
}

impl InputSource for ScriptedInput {
    fn listen(&mut self, _window: ListenWindow) -> Heard {
        *self.listens.borrow_mut() += 1;
        self.script.pop_front().unwrap_or(Heard::Closed)
    }
}

pub fn app(name: &str) -> AppName {
    AppName::new(name).expect("non-empty app name")
}

/// Engine using ".exe" so scenarios read the same on every host
pub fn engine(catalog: FakeCatalog, processes: FakeProcesses) -> ResolutionEngine<FakeCatalog, FakeProcesses> {
    ResolutionEngine::new(catalog, processes, ".exe")
}

pub fn processor(
    catalog: FakeCatalog,
    processes: FakeProcesses,
) -> CommandProcessor<FakeCatalog, FakeProcesses, Vec<u8>> {
    CommandProcessor::new(engine(catalog, processes), Vec::new())
}

/// Everything the processor has written so far
pub fn written(processor: &mut CommandProcessor<FakeCatalog, FakeProcesses, Vec<u8>>) -> String {
    String::from_utf8(processor.out().clone()).expect("utf-8 output")
}
