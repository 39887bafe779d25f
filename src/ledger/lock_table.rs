use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};

use crate::account::AccountId;

/// One exclusive lock per account id, created on first use.
#[derive(Default)]
pub struct AccountLocks {
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
}

impl AccountLocks {
    fn handle(&self, id: &AccountId) -> Arc<Mutex<()>> {
        // the map guard lives only for this statement
        Arc::clone(&self.locks.entry(id.clone()).or_default())
    }

    /// Locks of both accounts, sorted so the smaller id is always taken
    /// first. A transfer to the same account maps to a single lock.
    pub fn pair(&self, a: &AccountId, b: &AccountId) -> LockPair {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        LockPair {
            first: self.handle(first),
            second: (first != second).then(|| self.handle(second)),
        }
    }
}

pub struct LockPair {
    first: Arc<Mutex<()>>,
    second: Option<Arc<Mutex<()>>>,
}

impl LockPair {
    /// Blocks until both locks are held. Both are released when the
    /// returned guard is dropped.
    pub fn lock(&self) -> PairGuard<'_> {
        let first = self.first.lock();
        let second = self.second.as_ref().map(|lock| lock.lock());
        PairGuard {
            _second: second,
            _first: first,
        }
    }
}

pub struct PairGuard<'a> {
    _second: Option<MutexGuard<'a, ()>>,
    _first: MutexGuard<'a, ()>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(id: &str) -> AccountId {
        AccountId::new(id).unwrap()
    }

    #[test]
    fn pair_order_does_not_depend_on_direction() {
        let locks = AccountLocks::default();
        let forward = locks.pair(&id("a"), &id("b"));
        let backward = locks.pair(&id("b"), &id("a"));

        assert!(Arc::ptr_eq(&forward.first, &backward.first));
        assert!(Arc::ptr_eq(
            forward.second.as_ref().unwrap(),
            backward.second.as_ref().unwrap()
        ));
        assert!(Arc::ptr_eq(&forward.first, &locks.handle(&id("a"))));
    }

    #[test]
    fn same_account_takes_one_lock() {
        let locks = AccountLocks::default();
        let pair = locks.pair(&id("a"), &id("a"));
        assert!(pair.second.is_none());
        // would deadlock if the lock were taken twice
        let _guard = pair.lock();
    }

    #[test]
    fn guard_releases_on_drop() {
        let locks = AccountLocks::default();
        let pair = locks.pair(&id("a"), &id("b"));
        {
            let _guard = pair.lock();
            assert!(locks.handle(&id("a")).try_lock().is_none());
            assert!(locks.handle(&id("b")).try_lock().is_none());
        }
        assert!(locks.handle(&id("a")).try_lock().is_some());
        assert!(locks.handle(&id("b")).try_lock().is_some());
    }
}
