//! Classifies commands by what they require of, and what they establish for, other commands
//! running concurrently on the same connection (RFC 3501 §5.5).
//!
//! This is a pure analysis over the typed AST: it consults no connection state and performs no
//! I/O. A scheduler is expected to track, for each in-flight command, its [`behaviors`] (what it
//! *is*), and before dispatching a new command, check [`can_start`] against the accumulated
//! [`requirements`] of that new command and the behaviors of everything still running.

use imap_types::{
    command::{Command, CommandBody},
    search::SearchKey,
    sequence::{SeqOrUid, Sequence, SequenceSet},
};

/// A precondition that must hold of every currently-running command before a candidate command
/// may be dispatched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Requirement {
    /// No command that changes or depends on which mailbox is selected may be running.
    NoMailboxCommandsRunning,
    /// No running command may cause an untagged `EXPUNGE` response.
    NoUntaggedExpungeResponse,
    /// No running command may be UID-based.
    NoUIDBasedCommandRunning,
    /// No running command may change the flags of any message in `uids` (`None` = every message).
    NoFlagChanges(Option<Vec<MessageRange>>),
    /// No running command may read the flags of any message in `uids` (`None` = every message).
    NoFlagReads(Option<Vec<MessageRange>>),
}

/// A property a running command holds while it is in flight.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Changes which mailbox is selected (or deselects it).
    ChangesMailboxSelection,
    /// Requires a mailbox to already be selected.
    DependsOnMailboxSelection,
    /// May cause the server to emit an untagged `EXPUNGE`.
    MayTriggerUntaggedExpunge,
    /// Is a `UID`-prefixed variant of a sequence-number command.
    IsUIDBased,
    /// Changes the flags of the given messages (`None` = every message).
    ChangesFlags(Option<Vec<MessageRange>>),
    /// Reads the flags of the given messages (`None` = every message).
    ReadsFlags(Option<Vec<MessageRange>>),
    /// Forbids any other command from starting until this one's tagged response arrives.
    Barrier,
}

/// A closed range of message sequence numbers or UIDs, with `u32::MAX` standing in for `*`.
///
/// This is the type [`Requirement::NoFlagChanges`]/[`Behavior::ChangesFlags`] (and their `…Reads`
/// counterparts) use to describe *which* messages a command touches, so that two disjoint ranges
/// can be proven not to conflict without needing to know the mailbox's actual message count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRange {
    pub start: u32,
    pub end: u32,
}

impl MessageRange {
    fn intersects(&self, other: &MessageRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

fn seq_or_uid_value(value: &SeqOrUid) -> u32 {
    match value {
        SeqOrUid::Value(v) => v.get(),
        SeqOrUid::Asterisk => u32::MAX,
    }
}

fn sequence_set_to_ranges(set: &SequenceSet) -> Vec<MessageRange> {
    set.0
        .as_ref()
        .iter()
        .map(|sequence| match sequence {
            Sequence::Single(value) => MessageRange {
                start: seq_or_uid_value(value),
                end: seq_or_uid_value(value),
            },
            Sequence::Range(a, b) => {
                let a = seq_or_uid_value(a);
                let b = seq_or_uid_value(b);
                MessageRange {
                    start: a.min(b),
                    end: a.max(b),
                }
            }
        })
        .collect()
}

fn ranges_intersect(a: &Option<Vec<MessageRange>>, b: &Option<Vec<MessageRange>>) -> bool {
    match (a, b) {
        // A "whole-message-universe" scope intersects with anything, including another
        // whole-message-universe scope.
        (None, _) | (_, None) => true,
        (Some(a), Some(b)) => a.iter().any(|ra| b.iter().any(|rb| ra.intersects(rb))),
    }
}

/// Whether a search key, recursively, constrains by message sequence numbers.
fn search_key_references_sequence_numbers(key: &SearchKey<'_>) -> bool {
    match key {
        SearchKey::SequenceSet(_) => true,
        SearchKey::And(children) => children
            .as_ref()
            .iter()
            .any(search_key_references_sequence_numbers),
        SearchKey::Not(child) => search_key_references_sequence_numbers(child),
        SearchKey::Or(a, b) => {
            search_key_references_sequence_numbers(a) || search_key_references_sequence_numbers(b)
        }
        _ => false,
    }
}

/// Whether a search key, recursively, constrains by UID.
fn search_key_references_uids(key: &SearchKey<'_>) -> bool {
    match key {
        SearchKey::Uid(_) => true,
        SearchKey::And(children) => children.as_ref().iter().any(search_key_references_uids),
        SearchKey::Not(child) => search_key_references_uids(child),
        SearchKey::Or(a, b) => search_key_references_uids(a) || search_key_references_uids(b),
        _ => false,
    }
}

/// Whether a search key, recursively, reads message flags.
fn search_key_references_flags(key: &SearchKey<'_>) -> bool {
    match key {
        SearchKey::Answered
        | SearchKey::Unanswered
        | SearchKey::Deleted
        | SearchKey::Undeleted
        | SearchKey::Flagged
        | SearchKey::Unflagged
        | SearchKey::Keyword(_)
        | SearchKey::Unkeyword(_)
        | SearchKey::Seen
        | SearchKey::Unseen
        | SearchKey::Draft
        | SearchKey::Undraft => true,
        #[cfg(feature = "ext_condstore_qresync")]
        SearchKey::ModificationSequence(modseq) => modseq.extensions.is_some(),
        SearchKey::And(children) => children.as_ref().iter().any(search_key_references_flags),
        SearchKey::Not(child) => search_key_references_flags(child),
        SearchKey::Or(a, b) => search_key_references_flags(a) || search_key_references_flags(b),
        _ => false,
    }
}

fn search_key_uid_ranges(key: &SearchKey<'_>) -> Option<Vec<MessageRange>> {
    let mut ranges = Vec::new();
    collect_uid_ranges(key, &mut ranges);
    if ranges.is_empty() {
        None
    } else {
        Some(ranges)
    }
}

fn collect_uid_ranges(key: &SearchKey<'_>, out: &mut Vec<MessageRange>) {
    match key {
        SearchKey::Uid(set) => out.extend(sequence_set_to_ranges(set)),
        SearchKey::And(children) => {
            for child in children.as_ref() {
                collect_uid_ranges(child, out);
            }
        }
        SearchKey::Not(child) => collect_uid_ranges(child, out),
        SearchKey::Or(a, b) => {
            collect_uid_ranges(a, out);
            collect_uid_ranges(b, out);
        }
        _ => {}
    }
}

/// Compute the preconditions `command` imposes on whatever else is already running.
pub fn requirements(command: &Command<'_>) -> Vec<Requirement> {
    requirements_of_body(&command.body)
}

fn requirements_of_body(body: &CommandBody<'_>) -> Vec<Requirement> {
    use CommandBody::*;

    match body {
        Select { .. } | Unselect | Examine { .. } | Close => {
            vec![Requirement::NoMailboxCommandsRunning]
        }
        Fetch {
            macro_or_item_names,
            uid,
            sequence_set,
        } => {
            // `UID FETCH` is immune to untagged `EXPUNGE`s and carries no blanket UID-conflict
            // requirement; only its flag-read requirement is scoped to the given UIDs.
            let mut reqs = Vec::new();
            if !uid {
                reqs.push(Requirement::NoUntaggedExpungeResponse);
                reqs.push(Requirement::NoUIDBasedCommandRunning);
            }
            if fetch_reads_flags(macro_or_item_names) {
                let scope = if *uid {
                    Some(sequence_set_to_ranges(sequence_set))
                } else {
                    None
                };
                reqs.push(Requirement::NoFlagChanges(scope));
            }
            reqs
        }
        Store {
            response, uid, ..
        } => {
            let mut reqs = vec![Requirement::NoUntaggedExpungeResponse];
            if !uid {
                reqs.push(Requirement::NoUIDBasedCommandRunning);
            }
            reqs.push(Requirement::NoFlagReads(None));
            if !matches!(response, imap_types::flag::StoreResponse::Silent) {
                reqs.push(Requirement::NoFlagChanges(None));
            }
            reqs
        }
        Search {
            criteria, uid, ..
        } => search_like_requirements(criteria, *uid),
        Sort {
            search_criteria,
            uid,
            ..
        } => search_like_requirements(search_criteria, *uid),
        Thread {
            search_criteria,
            uid,
            ..
        } => search_like_requirements(search_criteria, *uid),
        Copy { uid, .. } | Move { uid, .. } => {
            let mut reqs = vec![Requirement::NoUntaggedExpungeResponse];
            if !uid {
                reqs.push(Requirement::NoUIDBasedCommandRunning);
            }
            reqs
        }
        ExpungeUid { .. } => vec![Requirement::NoUIDBasedCommandRunning],
        // `CUSTOM`/opaque commands aren't representable in this AST; every other named command
        // above has an explicit, narrower entry. Remaining named commands impose no requirement.
        _ => Vec::new(),
    }
}

fn search_like_requirements(criteria: &imap_types::core::Vec1<SearchKey<'_>>, uid: bool) -> Vec<Requirement> {
    let mut reqs = Vec::new();
    let references_sequence_numbers = criteria
        .as_ref()
        .iter()
        .any(search_key_references_sequence_numbers);
    if references_sequence_numbers || !uid {
        reqs.push(Requirement::NoUntaggedExpungeResponse);
        reqs.push(Requirement::NoUIDBasedCommandRunning);
    }
    if criteria.as_ref().iter().any(search_key_references_flags) {
        reqs.push(Requirement::NoFlagChanges(None));
    }
    reqs
}

fn fetch_reads_flags(names: &imap_types::fetch::MacroOrMessageDataItemNames<'_>) -> bool {
    use imap_types::fetch::{MacroOrMessageDataItemNames, MessageDataItemName};

    match names {
        MacroOrMessageDataItemNames::Macro(_) => true,
        MacroOrMessageDataItemNames::MessageDataItemNames(items) => items
            .iter()
            .any(|item| matches!(item, MessageDataItemName::Flags)),
    }
}

/// Compute the properties `command` establishes while it is running.
pub fn behaviors(command: &Command<'_>) -> Vec<Behavior> {
    behaviors_of_body(&command.body)
}

fn behaviors_of_body(body: &CommandBody<'_>) -> Vec<Behavior> {
    use CommandBody::*;

    match body {
        Select { .. } | Unselect | Examine { .. } | Close => vec![
            Behavior::ChangesMailboxSelection,
            Behavior::MayTriggerUntaggedExpunge,
        ],
        Noop | Check => vec![
            Behavior::DependsOnMailboxSelection,
            Behavior::MayTriggerUntaggedExpunge,
        ],
        Fetch {
            macro_or_item_names,
            uid,
            sequence_set,
        } => {
            let mut behaviors = vec![Behavior::DependsOnMailboxSelection];
            if *uid {
                behaviors.push(Behavior::IsUIDBased);
                behaviors.push(Behavior::MayTriggerUntaggedExpunge);
            }
            if fetch_reads_flags(macro_or_item_names) {
                let scope = if *uid {
                    Some(sequence_set_to_ranges(sequence_set))
                } else {
                    None
                };
                behaviors.push(Behavior::ReadsFlags(scope));
            }
            behaviors
        }
        Store {
            response,
            uid,
            sequence_set,
            ..
        } => {
            let scope = if *uid {
                Some(sequence_set_to_ranges(sequence_set))
            } else {
                None
            };
            let mut behaviors = vec![Behavior::ChangesFlags(scope.clone())];
            if *uid {
                behaviors.push(Behavior::IsUIDBased);
                behaviors.push(Behavior::MayTriggerUntaggedExpunge);
            }
            if !matches!(response, imap_types::flag::StoreResponse::Silent) {
                behaviors.push(Behavior::ReadsFlags(scope));
            }
            behaviors
        }
        Search { criteria, uid, .. } => search_like_behaviors(criteria, *uid),
        Sort {
            search_criteria,
            uid,
            ..
        } => search_like_behaviors(search_criteria, *uid),
        Thread {
            search_criteria,
            uid,
            ..
        } => search_like_behaviors(search_criteria, *uid),
        Copy { uid, .. } | Move { uid, .. } => {
            let mut behaviors = vec![
                Behavior::DependsOnMailboxSelection,
                Behavior::MayTriggerUntaggedExpunge,
            ];
            if *uid {
                behaviors.push(Behavior::IsUIDBased);
            }
            behaviors
        }
        Idle => vec![
            Behavior::Barrier,
            Behavior::DependsOnMailboxSelection,
            Behavior::MayTriggerUntaggedExpunge,
        ],
        Authenticate { .. } | Logout | Append { .. } => vec![Behavior::Barrier],
        #[cfg(feature = "starttls")]
        StartTLS => vec![Behavior::Barrier],
        Compress { .. } => vec![Behavior::Barrier],
        Create { .. }
        | Delete { .. }
        | Rename { .. }
        | Subscribe { .. }
        | Unsubscribe { .. }
        | List { .. }
        | Lsub { .. }
        | Status { .. }
        | Expunge
        | ExpungeUid { .. } => vec![Behavior::MayTriggerUntaggedExpunge],
        Enable { .. } | GetQuota { .. } | GetQuotaRoot { .. } | SetQuota { .. } => {
            vec![Behavior::MayTriggerUntaggedExpunge]
        }
        #[cfg(feature = "ext_id")]
        Id { .. } => vec![Behavior::MayTriggerUntaggedExpunge],
        #[cfg(feature = "ext_metadata")]
        SetMetadata { .. } | GetMetadata { .. } => vec![Behavior::MayTriggerUntaggedExpunge],
        // Capability/Logout-adjacent any-state commands and opaque/unknown commands.
        Capability => Vec::new(),
        _ => vec![Behavior::Barrier],
    }
}

fn search_like_behaviors(criteria: &imap_types::core::Vec1<SearchKey<'_>>, uid: bool) -> Vec<Behavior> {
    let mut behaviors = vec![Behavior::DependsOnMailboxSelection];

    let references_uids = criteria.as_ref().iter().any(search_key_references_uids);
    if uid || references_uids {
        behaviors.push(Behavior::IsUIDBased);
    }

    if criteria.as_ref().iter().any(search_key_references_flags) {
        let scope = criteria
            .as_ref()
            .iter()
            .find_map(search_key_uid_ranges);
        behaviors.push(Behavior::ReadsFlags(scope));
    }

    behaviors
}

/// Whether a command with `candidate_behaviors` may be dispatched while commands holding
/// `running_requirements` are in flight.
///
/// A barrier behavior always forbids starting concurrently. Otherwise, every requirement in
/// `running_requirements` must be satisfied by `candidate_behaviors`, i.e. the candidate must not
/// hold any behavior that violates it.
pub fn can_start(candidate_behaviors: &[Behavior], running_requirements: &[Requirement]) -> bool {
    if candidate_behaviors.contains(&Behavior::Barrier) {
        return false;
    }

    running_requirements
        .iter()
        .all(|req| satisfies(req, candidate_behaviors))
}

fn satisfies(requirement: &Requirement, behaviors: &[Behavior]) -> bool {
    match requirement {
        Requirement::NoMailboxCommandsRunning => !behaviors.iter().any(|b| {
            matches!(
                b,
                Behavior::ChangesMailboxSelection | Behavior::DependsOnMailboxSelection
            )
        }),
        Requirement::NoUntaggedExpungeResponse => {
            !behaviors.contains(&Behavior::MayTriggerUntaggedExpunge)
        }
        Requirement::NoUIDBasedCommandRunning => !behaviors.contains(&Behavior::IsUIDBased),
        Requirement::NoFlagChanges(uids) => !behaviors.iter().any(|b| match b {
            Behavior::ChangesFlags(other) => ranges_intersect(uids, other),
            _ => false,
        }),
        Requirement::NoFlagReads(uids) => !behaviors.iter().any(|b| match b {
            Behavior::ReadsFlags(other) => ranges_intersect(uids, other),
            _ => false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use imap_types::{
        command::{Command, CommandBody},
        core::Tag,
        fetch::{MacroOrMessageDataItemNames, MessageDataItemName},
        sequence::SequenceSet,
    };

    use super::*;

    fn cmd(body: CommandBody<'static>) -> Command<'static> {
        Command::new(Tag::try_from("A").unwrap(), body).unwrap()
    }

    #[test]
    fn fetch_cannot_start_while_select_is_running() {
        let select = cmd(CommandBody::Select {
            mailbox: "INBOX".try_into().unwrap(),
        });
        let fetch = cmd(CommandBody::Fetch {
            sequence_set: SequenceSet::try_from(1).unwrap(),
            macro_or_item_names: MacroOrMessageDataItemNames::Macro(
                imap_types::fetch::Macro::Fast,
            ),
            uid: false,
        });

        assert!(!can_start(&behaviors(&fetch), &requirements(&select)));
    }

    #[test]
    fn disjoint_uid_fetch_and_uid_store_can_run_together() {
        let fetch = cmd(CommandBody::Fetch {
            sequence_set: SequenceSet::try_from(1..=10).unwrap(),
            macro_or_item_names: MacroOrMessageDataItemNames::MessageDataItemNames(vec![
                MessageDataItemName::Flags,
            ]),
            uid: true,
        });
        let store = cmd(CommandBody::Store {
            sequence_set: SequenceSet::try_from(20..=30).unwrap(),
            kind: imap_types::flag::StoreType::Add,
            response: imap_types::flag::StoreResponse::Silent,
            flags: vec![imap_types::flag::Flag::Seen],
            uid: true,
        });

        let fetch_reqs = requirements(&fetch);
        let store_behaviors = behaviors(&store);

        assert!(can_start(&store_behaviors, &fetch_reqs));
    }

    #[test]
    fn overlapping_uid_fetch_and_uid_store_cannot_run_together() {
        let fetch = cmd(CommandBody::Fetch {
            sequence_set: SequenceSet::try_from(1..=10).unwrap(),
            macro_or_item_names: MacroOrMessageDataItemNames::MessageDataItemNames(vec![
                MessageDataItemName::Flags,
            ]),
            uid: true,
        });
        let store = cmd(CommandBody::Store {
            sequence_set: SequenceSet::try_from(5..=15).unwrap(),
            kind: imap_types::flag::StoreType::Add,
            response: imap_types::flag::StoreResponse::Silent,
            flags: vec![imap_types::flag::Flag::Seen],
            uid: true,
        });

        let fetch_reqs = requirements(&fetch);
        let store_behaviors = behaviors(&store);

        assert!(!can_start(&store_behaviors, &fetch_reqs));
    }

    #[test]
    fn idle_is_a_barrier() {
        let idle = cmd(CommandBody::Idle);
        assert!(behaviors(&idle).contains(&Behavior::Barrier));
        assert!(!can_start(&behaviors(&idle), &[]));
    }

    #[test]
    fn capability_has_no_requirements_or_barrier_behavior() {
        let capability = cmd(CommandBody::Capability);
        assert!(requirements(&capability).is_empty());
        assert!(!behaviors(&capability).contains(&Behavior::Barrier));
    }
}
