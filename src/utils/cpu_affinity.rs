//! Pinning the measuring thread to one CPU core.
//!
//! A thread that migrates between cores mid-trial pays cold caches and
//! shows up as timing noise. On Linux the thread is pinned with
//! `sched_setaffinity` and the previous mask is restored on drop; elsewhere
//! pinning is a no-op that reports failure.

#[cfg(target_os = "linux")]
mod platform {
    pub type SavedMask = libc::cpu_set_t;

    pub fn current_cpu() -> Option<usize> {
        // SAFETY: sched_getcpu has no preconditions.
        let cpu = unsafe { libc::sched_getcpu() };
        usize::try_from(cpu).ok()
    }

    pub fn save() -> Option<SavedMask> {
        // SAFETY: a zeroed cpu_set_t is a valid empty set, and the size
        // passed matches the buffer.
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            (libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set) == 0)
                .then_some(set)
        }
    }

    pub fn pin(core: usize) -> bool {
        // SAFETY: as above; CPU_SET only writes inside `set`.
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core, &mut set);
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
        }
    }

    pub fn restore(mask: &SavedMask) -> bool {
        // SAFETY: `mask` was filled by sched_getaffinity.
        unsafe { libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), mask) == 0 }
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub type SavedMask = ();

    pub fn current_cpu() -> Option<usize> {
        None
    }

    pub fn save() -> Option<SavedMask> {
        None
    }

    pub fn pin(_core: usize) -> bool {
        false
    }

    pub fn restore(_mask: &SavedMask) -> bool {
        true
    }
}

/// RAII guard: pins the current thread on creation, restores on drop.
///
/// # Example
/// ```no_run
/// use dot_product_bench::utils::CpuPinGuard;
///
/// let pin = CpuPinGuard::current_core();
/// if let Some(core) = pin.core_id() {
///     println!("measuring on core {}", core);
/// }
/// // affinity restored when `pin` drops
/// ```
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
    saved: Option<platform::SavedMask>,
}

impl CpuPinGuard {
    /// Pin to the core the thread is running on right now.
    pub fn current_core() -> Self {
        let Some(core) = platform::current_cpu() else {
            return Self::unpinned();
        };
        let Some(saved) = platform::save() else {
            return Self::unpinned();
        };
        if platform::pin(core) {
            Self {
                pinned_core: Some(core),
                saved: Some(saved),
            }
        } else {
            Self::unpinned()
        }
    }

    /// A guard that pinned nothing.
    pub fn unpinned() -> Self {
        Self {
            pinned_core: None,
            saved: None,
        }
    }

    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if let Some(mask) = self.saved.take() {
            if !platform::restore(&mask) {
                log::warn!("failed to restore CPU affinity");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpinned_guard() {
        let guard = CpuPinGuard::unpinned();
        assert!(!guard.is_pinned());
        assert_eq!(guard.core_id(), None);
    }

    #[test]
    fn test_pin_guard_roundtrip() {
        let guard = CpuPinGuard::current_core();
        // Containers may forbid pinning; only check consistency.
        assert_eq!(guard.is_pinned(), guard.core_id().is_some());
        drop(guard);

        let again = CpuPinGuard::current_core();
        assert_eq!(again.is_pinned(), again.core_id().is_some());
    }
}
