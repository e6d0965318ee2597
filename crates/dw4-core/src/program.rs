//! Programs: a plate card, an arena of steps, and repeat loops over them.
//!
//! Steps are addressed by [`StepId`], which stays valid while other steps are
//! inserted or removed. Repeat loops reference their first and last step by
//! id, so editing the program never silently shifts a loop onto the wrong
//! steps. Positions (1-based, plate card excluded) only appear at the edges:
//! in JSON and in the compiled instruction table.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::step::{PlateCard, Step};

/// Stable handle of a step within one [`Program`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct StepId(u32);

impl StepId {
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Repeat the steps `first..=last` a number of times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatLoop {
    pub first: StepId,
    pub last: StepId,
    pub repeats: u8,
}

impl RepeatLoop {
    pub const MAX_REPEATS: u8 = 10;
}

/// A repeat loop resolved to step positions.
///
/// `to` is the position of the first step of the body, `from` the position of
/// the last one (the loop jumps from `from` back to `to`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopSpan {
    pub from: usize,
    pub to: usize,
    pub repeats: u8,
}

impl LoopSpan {
    pub fn new(to: usize, from: usize, repeats: u8) -> Self {
        Self { from, to, repeats }
    }

    /// Number of steps in the loop body.
    pub fn body_len(&self) -> usize {
        self.from + 1 - self.to
    }

    pub fn overlaps(&self, other: &LoopSpan) -> bool {
        self.to <= other.from && other.to <= self.from
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "ProgramDoc", into = "ProgramDoc")]
pub struct Program {
    pub name: String,
    pub plate: PlateCard,
    arena: Vec<Option<Step>>,
    order: Vec<StepId>,
    loops: Vec<RepeatLoop>,
}

impl Program {
    pub fn new(name: impl Into<String>, plate: PlateCard) -> Self {
        Self {
            name: name.into(),
            plate,
            arena: Vec::new(),
            order: Vec::new(),
            loops: Vec::new(),
        }
    }

    /// Number of steps after the plate card.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Append a step and return its id.
    pub fn push(&mut self, step: impl Into<Step>) -> StepId {
        let id = self.alloc(step.into());
        self.order.push(id);
        id
    }

    /// Insert a step so that it ends up at `position` (1-based).
    pub fn insert(&mut self, position: usize, step: impl Into<Step>) -> Result<StepId, ModelError> {
        if position == 0 || position > self.order.len() + 1 {
            return Err(ModelError::StepPosition(position));
        }
        let id = self.alloc(step.into());
        self.order.insert(position - 1, id);
        Ok(id)
    }

    /// Remove a step. Loops that start or end on it are dropped with it.
    pub fn remove(&mut self, id: StepId) -> Option<Step> {
        let step = self.arena.get_mut(id.0 as usize)?.take()?;
        self.order.retain(|&other| other != id);
        self.loops.retain(|l| l.first != id && l.last != id);
        Some(step)
    }

    pub fn get(&self, id: StepId) -> Option<&Step> {
        self.arena.get(id.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: StepId) -> Option<&mut Step> {
        self.arena.get_mut(id.0 as usize)?.as_mut()
    }

    /// Steps in program order.
    pub fn steps(&self) -> impl Iterator<Item = (StepId, &Step)> + '_ {
        self.order.iter().filter_map(|&id| Some((id, self.get(id)?)))
    }

    /// 1-based position of a step.
    pub fn position(&self, id: StepId) -> Option<usize> {
        self.order.iter().position(|&other| other == id).map(|i| i + 1)
    }

    pub fn id_at(&self, position: usize) -> Option<StepId> {
        self.order.get(position.checked_sub(1)?).copied()
    }

    pub fn loops(&self) -> &[RepeatLoop] {
        &self.loops
    }

    /// Add a loop over `first..=last`.
    ///
    /// Loops may not overlap, nest, or share steps.
    pub fn add_loop(&mut self, first: StepId, last: StepId, repeats: u8) -> Result<(), ModelError> {
        if repeats == 0 || repeats > RepeatLoop::MAX_REPEATS {
            return Err(ModelError::RepeatCount(repeats));
        }
        let to = self.position(first).ok_or(ModelError::UnknownStep(first))?;
        let from = self.position(last).ok_or(ModelError::UnknownStep(last))?;
        if to > from {
            return Err(ModelError::LoopOrder { to, from });
        }
        let span = LoopSpan::new(to, from, repeats);
        if self.loop_spans().iter().any(|other| other.overlaps(&span)) {
            return Err(ModelError::LoopOverlap { to, from });
        }
        self.loops.push(RepeatLoop {
            first,
            last,
            repeats,
        });
        Ok(())
    }

    /// Add a loop addressed by positions (`to` = first step, `from` = last step).
    pub fn add_loop_at(&mut self, to: usize, from: usize, repeats: u8) -> Result<(), ModelError> {
        let first = self.id_at(to).ok_or(ModelError::StepPosition(to))?;
        let last = self.id_at(from).ok_or(ModelError::StepPosition(from))?;
        self.add_loop(first, last, repeats)
    }

    /// Loops resolved to positions, ordered by their first step.
    pub fn loop_spans(&self) -> Vec<LoopSpan> {
        let mut spans: Vec<LoopSpan> = self
            .loops
            .iter()
            .filter_map(|l| {
                Some(LoopSpan::new(
                    self.position(l.first)?,
                    self.position(l.last)?,
                    l.repeats,
                ))
            })
            .collect();
        spans.sort_by_key(|span| span.to);
        spans
    }

    fn alloc(&mut self, step: Step) -> StepId {
        let id = StepId(self.arena.len() as u32);
        self.arena.push(Some(step));
        id
    }
}

/// Programs compare by content: same plate, same steps in the same order,
/// loops over the same positions. Step ids are not part of the identity.
impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.plate == other.plate
            && self.steps().map(|(_, s)| s).eq(other.steps().map(|(_, s)| s))
            && self.loop_spans() == other.loop_spans()
    }
}

impl Eq for Program {}

/// Serialized form of a program: steps as a list, loops by position.
#[derive(Serialize, Deserialize)]
struct ProgramDoc {
    name: String,
    plate: PlateCard,
    #[serde(default)]
    steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    loops: Vec<LoopSpan>,
}

impl TryFrom<ProgramDoc> for Program {
    type Error = ModelError;

    fn try_from(doc: ProgramDoc) -> Result<Self, Self::Error> {
        let mut program = Program::new(doc.name, doc.plate);
        for step in doc.steps {
            program.push(step);
        }
        for span in doc.loops {
            program.add_loop_at(span.to, span.from, span.repeats)?;
        }
        Ok(program)
    }
}

impl From<Program> for ProgramDoc {
    fn from(program: Program) -> Self {
        let loops = program.loop_spans();
        let steps = program.steps().map(|(_, s)| s.clone()).collect();
        Self {
            name: program.name,
            plate: program.plate,
            steps,
            loops,
        }
    }
}

/// A named set of programs, the unit transferred to and from the device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramFile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<NaiveDate>,
    #[serde(default)]
    pub programs: Vec<Program>,
}

impl ProgramFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: None,
            programs: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
