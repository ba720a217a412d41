use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::{Storage, StorageError};
use crate::models::{
    AiAnalysis, Appointment, HealthRecord, Id, NewAiAnalysis, NewAppointment, NewHealthRecord,
    NewUser, User,
};

/// One table: rows by id plus the next id to hand out (starts at 1).
struct Table<T> {
    rows: BTreeMap<Id, T>,
    next_id: Id,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(Id) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn filtered(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|r| keep(r)).cloned().collect()
    }
}

/// Process-local store. Contents are lost on restart.
///
/// Each table has its own `RwLock` so reads of one entity never wait on
/// writes to another. Locks are never held across `.await`.
pub struct MemStorage {
    users: RwLock<Table<User>>,
    appointments: RwLock<Table<Appointment>>,
    health_records: RwLock<Table<HealthRecord>>,
    analyses: RwLock<Table<AiAnalysis>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Table::new()),
            appointments: RwLock::new(Table::new()),
            health_records: RwLock::new(Table::new()),
            analyses: RwLock::new(Table::new()),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StorageError> {
    lock.read().map_err(|_| StorageError::LockPoisoned)
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StorageError> {
    lock.write().map_err(|_| StorageError::LockPoisoned)
}

impl Storage for MemStorage {
    fn get_user(&self, id: Id) -> Result<Option<User>, StorageError> {
        Ok(read(&self.users)?.rows.get(&id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        Ok(read(&self.users)?
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    fn create_user(&self, user: NewUser, password_hash: String) -> Result<User, StorageError> {
        let mut users = write(&self.users)?;
        let username = user.username.trim();
        if users.rows.values().any(|u| u.username == username) {
            return Err(StorageError::DuplicateUsername(username.to_string()));
        }
        Ok(users.insert_with(|id| user.into_user(id, password_hash)))
    }

    fn appointments_for_user(&self, user_id: Id) -> Result<Vec<Appointment>, StorageError> {
        Ok(read(&self.appointments)?.filtered(|a| a.user_id == user_id))
    }

    fn create_appointment(
        &self,
        user_id: Id,
        appointment: NewAppointment,
    ) -> Result<Appointment, StorageError> {
        Ok(write(&self.appointments)?.insert_with(|id| appointment.into_appointment(id, user_id)))
    }

    fn health_records_for_user(&self, user_id: Id) -> Result<Vec<HealthRecord>, StorageError> {
        Ok(read(&self.health_records)?.filtered(|r| r.user_id == user_id))
    }

    fn create_health_record(
        &self,
        user_id: Id,
        record: NewHealthRecord,
    ) -> Result<HealthRecord, StorageError> {
        Ok(write(&self.health_records)?.insert_with(|id| record.into_record(id, user_id)))
    }

    fn analyses_for_user(&self, user_id: Id) -> Result<Vec<AiAnalysis>, StorageError> {
        Ok(read(&self.analyses)?.filtered(|a| a.user_id == user_id))
    }

    fn create_analysis(&self, analysis: NewAiAnalysis) -> Result<AiAnalysis, StorageError> {
        let now = Utc::now();
        Ok(write(&self.analyses)?.insert_with(|id| analysis.into_analysis(id, now)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::triage::SymptomCategory;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.into(),
            password: "irrelevant-here".into(),
            full_name: "Test Patient".into(),
            email: "patient@example.org".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            gender: "other".into(),
        }
    }

    fn new_appointment(doctor: &str) -> NewAppointment {
        NewAppointment {
            doctor_name: doctor.into(),
            clinic_name: "Northside Clinic".into(),
            date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            time: "08:45".into(),
        }
    }

    #[test]
    fn ids_start_at_one_and_increase_per_table() {
        let store = MemStorage::new();
        let u1 = store.create_user(new_user("alice"), "h".into()).unwrap();
        let u2 = store.create_user(new_user("bob"), "h".into()).unwrap();
        let a1 = store.create_appointment(u1.id, new_appointment("Dr. A")).unwrap();

        assert_eq!((u1.id, u2.id), (1, 2));
        assert_eq!(a1.id, 1);
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let store = MemStorage::new();
        store.create_user(new_user("alice"), "h".into()).unwrap();
        let err = store.create_user(new_user(" alice "), "h".into()).unwrap_err();
        assert_eq!(err, StorageError::DuplicateUsername("alice".into()));
    }

    #[test]
    fn lookup_by_username_and_id() {
        let store = MemStorage::new();
        let created = store.create_user(new_user("carol"), "hash".into()).unwrap();

        let by_name = store.get_user_by_username("carol").unwrap().unwrap();
        assert_eq!(by_name, created);
        assert_eq!(store.get_user(created.id).unwrap(), Some(created));
        assert!(store.get_user(99).unwrap().is_none());
        assert!(store.get_user_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn appointments_are_scoped_to_owner_in_creation_order() {
        let store = MemStorage::new();
        store.create_appointment(1, new_appointment("Dr. First")).unwrap();
        store.create_appointment(2, new_appointment("Dr. Other")).unwrap();
        store.create_appointment(1, new_appointment("Dr. Second")).unwrap();

        let mine = store.appointments_for_user(1).unwrap();
        let doctors: Vec<_> = mine.iter().map(|a| a.doctor_name.as_str()).collect();
        assert_eq!(doctors, vec!["Dr. First", "Dr. Second"]);
        assert!(store.appointments_for_user(3).unwrap().is_empty());
    }

    #[test]
    fn health_records_are_scoped_to_owner() {
        let store = MemStorage::new();
        let record = NewHealthRecord {
            diagnosis: "Iron deficiency anaemia".into(),
            doctor: "Dr. Haddad".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
        };
        store.create_health_record(4, record).unwrap();

        assert_eq!(store.health_records_for_user(4).unwrap().len(), 1);
        assert!(store.health_records_for_user(5).unwrap().is_empty());
    }

    #[test]
    fn analyses_are_timestamped_on_insert() {
        let store = MemStorage::new();
        let before = Utc::now();
        let stored = store
            .create_analysis(NewAiAnalysis {
                user_id: 1,
                category: SymptomCategory::Skin,
                symptoms: "rash".into(),
                analysis: "Likely contact dermatitis.".into(),
            })
            .unwrap();

        assert_eq!(stored.id, 1);
        assert!(stored.date >= before);
        assert_eq!(store.analyses_for_user(1).unwrap(), vec![stored]);
    }
}
