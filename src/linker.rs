//! Attaches methods to the struct or type declared with their receiver name.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{File, MethodRef};

/// Outcome of one linking pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Methods attached to an owner
    pub linked: usize,
    /// Receivers other than `T` or `*T`, e.g. `[]T` or `**T`
    pub uncommon: Vec<MethodRef>,
    /// Common receivers naming no struct or type of this file
    pub unmatched: Vec<MethodRef>,
}

#[derive(Debug, Clone, Copy)]
enum Owner {
    Struct(usize),
    Type(usize),
}

/// Single pass over `File::methods`; structs win over types of the same name.
#[derive(Debug, Default)]
pub struct MethodLinker {
    report: LinkReport,
}

impl MethodLinker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(mut self, file: &mut File) -> LinkReport {
        let mut owners: HashMap<&str, Owner> = HashMap::new();
        for (i, t) in file.types.iter().enumerate() {
            owners.insert(&t.name, Owner::Type(i));
        }
        for (i, s) in file.structures.iter().enumerate() {
            owners.insert(&s.name, Owner::Struct(i));
        }

        let mut links = Vec::new();
        for (i, method) in file.methods.iter().enumerate() {
            let r = MethodRef(i);
            let Some(base) = method.receiver.ty.as_ref().and_then(|t| t.receiver_name()) else {
                debug!(method = %method.name, receiver = %method.receiver, "uncommon receiver");
                self.report.uncommon.push(r);
                continue;
            };
            match owners.get(base) {
                Some(&owner) => links.push((owner, r)),
                None => {
                    debug!(method = %method.name, receiver = base, "no owner in file");
                    self.report.unmatched.push(r);
                }
            }
        }

        self.report.linked = links.len();
        for (owner, r) in links {
            match owner {
                Owner::Struct(i) => file.structures[i].methods.push(r),
                Owner::Type(i) => file.types[i].methods.push(r),
            }
        }
        self.report
    }
}

/// Links `file` in place.
pub fn link(file: &mut File) -> LinkReport {
    MethodLinker::new().link(file)
}
