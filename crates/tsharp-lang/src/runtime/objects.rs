use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ErrorKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameObject {
    pub id: u64,
    pub kind: String,
    pub position: [f64; 3],
    /// Degrees about x, y and z.
    pub rotation: [f64; 3],
    pub alive: bool,
}

/// Handle → object record for one run. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct ObjectTable {
    objects: BTreeMap<u64, GameObject>,
    next_id: u64,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self { objects: BTreeMap::new(), next_id: 1 }
    }

    pub fn spawn(&mut self, kind: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.insert(id, GameObject {
            id,
            kind: kind.to_string(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            alive: true,
        });
        log::debug!("spawned object {id} ({kind})");
        id
    }

    pub fn is_alive(&self, id: u64) -> bool {
        self.objects.get(&id).is_some_and(|o| o.alive)
    }

    fn live_mut(&mut self, id: u64) -> Result<&mut GameObject, ErrorKind> {
        match self.objects.get_mut(&id) {
            Some(o) if o.alive => Ok(o),
            _ => Err(ErrorKind::UnknownOrDeadObject { id }),
        }
    }

    pub fn set_position(&mut self, id: u64, position: [f64; 3]) -> Result<(), ErrorKind> {
        self.live_mut(id)?.position = position;
        log::debug!("object {id} moved to {position:?}");
        Ok(())
    }

    pub fn set_rotation(&mut self, id: u64, rotation: [f64; 3]) -> Result<(), ErrorKind> {
        self.live_mut(id)?.rotation = rotation;
        log::debug!("object {id} rotated to {rotation:?}");
        Ok(())
    }

    pub fn destroy(&mut self, id: u64) -> Result<(), ErrorKind> {
        self.live_mut(id)?.alive = false;
        log::debug!("object {id} destroyed");
        Ok(())
    }

    pub(crate) fn len(&self) -> usize { self.objects.len() }

    /// Every object ever spawned, dead ones included, in id order.
    pub fn snapshot(&self) -> Vec<GameObject> {
        self.objects.values().cloned().collect()
    }
}

impl Default for ObjectTable {
    fn default() -> Self { Self::new() }
}
