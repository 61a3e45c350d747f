use std::collections::BTreeSet;

use proptest::prelude::*;

use outreachlog::{
    backend::{TabularBackend, memory::MemoryGrid},
    core::records::{EMAIL_COL, FIRST_DATA_ROW, NAME_COL, RecordStore},
    core::settings::SettingsStore,
    entry::{EntryDraft, normalize_email},
    submit::{SubmitError, Submitter},
};

#[derive(Debug, Clone)]
enum Action {
    Submit {
        name_idx: u8,
        email_idx: u8,
        shout: bool,
        pad: bool,
    },
    BlankRow {
        target: u8,
    },
    UpdateName {
        name_idx: u8,
    },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..6, 0u8..24, any::<bool>(), any::<bool>()).prop_map(
            |(name_idx, email_idx, shout, pad)| Action::Submit {
                name_idx,
                email_idx,
                shout,
                pad,
            }
        ),
        (0u8..32).prop_map(|target| Action::BlankRow { target }),
        (0u8..6).prop_map(|name_idx| Action::UpdateName { name_idx }),
    ]
}

fn email_for(email_idx: u8, shout: bool, pad: bool) -> String {
    let mut email = format!("user{email_idx}@x.com");
    if shout {
        email = email.to_uppercase();
    }
    if pad {
        email = format!("  {email} ");
    }
    email
}

fn persisted_emails(grid: &MemoryGrid) -> Vec<String> {
    grid.read_column("Outreach", EMAIL_COL)
        .expect("email column")
        .iter()
        .skip(1)
        .map(|value| normalize_email(value))
        .filter(|value| !value.is_empty())
        .collect()
}

fn first_eligible_slot(grid: &MemoryGrid) -> usize {
    let names = grid.read_column("Outreach", NAME_COL).expect("name column");
    for (ix, value) in names.iter().enumerate().skip(1) {
        if value.trim().is_empty() {
            return ix + 1;
        }
    }
    (names.len() + 1).max(FIRST_DATA_ROW)
}

proptest! {
    #[test]
    fn random_sequences_keep_emails_unique_and_slots_backfilled(
        actions in prop::collection::vec(action_strategy(), 1..120)
    ) {
        let mut grid = MemoryGrid::new();
        let submitter = Submitter::new(
            RecordStore::new("Outreach"),
            SettingsStore::new("Settings"),
        );
        let mut settings = submitter.open(&mut grid).expect("open");
        let mut model = BTreeSet::<String>::new();

        for action in actions {
            match action {
                Action::Submit { name_idx, email_idx, shout, pad } => {
                    let email = email_for(email_idx, shout, pad);
                    let normalized = normalize_email(&email);
                    let expected_slot = first_eligible_slot(&grid);

                    let result = submitter.submit(
                        &mut grid,
                        EntryDraft {
                            submitter_name: format!("Name{name_idx}"),
                            client_email: email,
                            reference: String::new(),
                        },
                        &settings,
                    );

                    if model.contains(&normalized) {
                        prop_assert!(
                            matches!(result, Err(SubmitError::DuplicateEmail { .. })),
                            "expected DuplicateEmail error, got {:?}",
                            result
                        );
                    } else {
                        let (receipt, updated) = result.expect("fresh email should be accepted");
                        prop_assert_eq!(receipt.row, expected_slot);
                        settings = updated;
                        model.insert(normalized);
                    }
                }
                Action::BlankRow { target } => {
                    let rows = grid.read_all("Outreach").expect("read all");
                    let occupied: Vec<usize> = rows
                        .iter()
                        .enumerate()
                        .skip(1)
                        .filter(|(_, cells)| {
                            cells
                                .get(NAME_COL - 1)
                                .is_some_and(|name| !name.trim().is_empty())
                        })
                        .map(|(ix, _)| ix + 1)
                        .collect();
                    if occupied.is_empty() {
                        continue;
                    }
                    let row = occupied[usize::from(target) % occupied.len()];
                    let email = grid
                        .read_row("Outreach", row)
                        .expect("read row")
                        .get(EMAIL_COL - 1)
                        .cloned()
                        .unwrap_or_default();
                    grid.write_cell("Outreach", row, NAME_COL, "").expect("blank name");
                    grid.write_cell("Outreach", row, EMAIL_COL, "").expect("blank email");
                    model.remove(&normalize_email(&email));
                }
                Action::UpdateName { name_idx } => {
                    settings = submitter
                        .update_name(&mut grid, &format!("Name{name_idx}"))
                        .expect("update name");
                }
            }

            // Uniqueness invariant: no two persisted entries share a
            // normalized email, and the grid agrees with the model.
            let emails = persisted_emails(&grid);
            let unique: BTreeSet<String> = emails.iter().cloned().collect();
            prop_assert_eq!(emails.len(), unique.len());
            prop_assert_eq!(&unique, &model);
        }
    }
}
