//! Unit tests for the booking engine

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use kernel::context::{RequestUser, Role};
use kernel::id::{BookingId, MachineId, UserId};
use rust_decimal_macros::dec;
use uuid::Uuid;

use catalog::domain::repository::{MachineFilter, MachineRepository};
use catalog::models::{Machine, MachineStatus, MachineType};

use crate::application::{
    BookingQueryUseCase, BookingTransitionUseCase, CreateBookingInput, CreateBookingUseCase,
    MessageThreadUseCase,
};
use crate::domain::entities::{
    Booking, BookingMessage, BookingStatus, MessageType, RentalDuration,
};
use crate::domain::pricing;
use crate::domain::repository::{
    BookingRepository, BookingStatistics, BookingWithMachine, MessageRepository,
};
use crate::error::{BookingError, BookingResult};

// ============================================================================
// Fixtures
// ============================================================================

fn machine(total_units: i32, rented_units: i32) -> Machine {
    let now = Utc::now();
    Machine {
        machine_id: MachineId::new(),
        name: "Antminer S19".to_string(),
        description: None,
        image: None,
        machine_type: MachineType::Asic,
        manufacturer: Some("Bitmain".to_string()),
        model: Some("S19 Pro".to_string()),
        hash_rate: Some(dec!(110)),
        hash_rate_unit: Some("TH/s".to_string()),
        power_consumption: Some(dec!(3250)),
        algorithm: Some("SHA-256".to_string()),
        mining_coin: Some("BTC".to_string()),
        efficiency: Some(dec!(29.5)),
        price_per_hour: dec!(5),
        price_per_day: dec!(120),
        price_per_week: dec!(750),
        price_per_month: dec!(2800),
        profit_per_hour: dec!(0.5),
        profit_per_day: dec!(12),
        profit_per_week: dec!(80),
        profit_per_month: dec!(310),
        status: MachineStatus::Available,
        total_units,
        rented_units,
        is_active: true,
        is_featured: false,
        sort_order: 0,
        created_at: now,
        updated_at: now,
    }
}

fn pending_booking(user_id: UserId, machine_id: MachineId) -> Booking {
    Booking::new(
        user_id,
        machine_id,
        RentalDuration::Day,
        2,
        dec!(240),
        None,
    )
}

fn requester(user_id: UserId) -> RequestUser {
    RequestUser {
        user_id,
        email: "user@example.com".to_string(),
        role: Role::User,
    }
}

fn reviewer(user_id: UserId) -> RequestUser {
    RequestUser {
        user_id,
        email: "admin@example.com".to_string(),
        role: Role::Admin,
    }
}

// ============================================================================
// In-memory store implementing the repository traits
// ============================================================================

#[derive(Clone, Default)]
struct MemStore {
    machines: Arc<Mutex<HashMap<Uuid, Machine>>>,
    bookings: Arc<Mutex<HashMap<Uuid, Booking>>>,
    messages: Arc<Mutex<Vec<BookingMessage>>>,
}

impl MemStore {
    fn with_machine(machine: Machine) -> Self {
        let store = Self::default();
        store
            .machines
            .lock()
            .unwrap()
            .insert(machine.machine_id.into_uuid(), machine);
        store
    }

    fn machine_name(&self, machine_id: &MachineId) -> String {
        self.machines
            .lock()
            .unwrap()
            .get(machine_id.as_uuid())
            .map(|m| m.name.clone())
            .unwrap_or_default()
    }

    fn rented_units(&self, machine_id: &MachineId) -> i32 {
        self.machines.lock().unwrap()[machine_id.as_uuid()].rented_units
    }

    fn system_message_count(&self, booking_id: &BookingId) -> usize {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| {
                m.booking_id == *booking_id && m.message_type == MessageType::System
            })
            .count()
    }
}

impl MachineRepository for MemStore {
    async fn create(&self, machine: &Machine) -> catalog::CatalogResult<()> {
        self.machines
            .lock()
            .unwrap()
            .insert(machine.machine_id.into_uuid(), machine.clone());
        Ok(())
    }

    async fn find_by_id(&self, machine_id: &MachineId) -> catalog::CatalogResult<Option<Machine>> {
        Ok(self.machines.lock().unwrap().get(machine_id.as_uuid()).cloned())
    }

    async fn list(&self, _filter: &MachineFilter) -> catalog::CatalogResult<Vec<Machine>> {
        Ok(self.machines.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, machine: &Machine) -> catalog::CatalogResult<()> {
        self.machines
            .lock()
            .unwrap()
            .insert(machine.machine_id.into_uuid(), machine.clone());
        Ok(())
    }

    async fn delete(&self, machine_id: &MachineId) -> catalog::CatalogResult<()> {
        self.machines.lock().unwrap().remove(machine_id.as_uuid());
        Ok(())
    }
}

impl BookingRepository for MemStore {
    async fn create(
        &self,
        booking: &Booking,
        opening_message: &BookingMessage,
    ) -> BookingResult<()> {
        self.bookings
            .lock()
            .unwrap()
            .insert(booking.booking_id.into_uuid(), booking.clone());
        self.messages.lock().unwrap().push(opening_message.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        booking_id: &BookingId,
    ) -> BookingResult<Option<BookingWithMachine>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .get(booking_id.as_uuid())
            .cloned()
            .map(|booking| {
                let machine_name = self.machine_name(&booking.machine_id);
                BookingWithMachine {
                    booking,
                    machine_name,
                }
            }))
    }

    async fn list_for_user(&self, user_id: &UserId) -> BookingResult<Vec<BookingWithMachine>> {
        let mut items: Vec<BookingWithMachine> = self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.user_id == *user_id)
            .cloned()
            .map(|booking| {
                let machine_name = self.machine_name(&booking.machine_id);
                BookingWithMachine {
                    booking,
                    machine_name,
                }
            })
            .collect();
        items.sort_by(|a, b| b.booking.created_at.cmp(&a.booking.created_at));
        Ok(items)
    }

    async fn list_paged(
        &self,
        status: Option<BookingStatus>,
        page: u32,
        limit: u32,
    ) -> BookingResult<(Vec<BookingWithMachine>, u64)> {
        let mut items: Vec<BookingWithMachine> = self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| status.is_none_or(|s| b.status == s))
            .cloned()
            .map(|booking| {
                let machine_name = self.machine_name(&booking.machine_id);
                BookingWithMachine {
                    booking,
                    machine_name,
                }
            })
            .collect();
        items.sort_by(|a, b| b.booking.created_at.cmp(&a.booking.created_at));

        let total = items.len() as u64;
        let start = ((page - 1) * limit) as usize;
        let items = items
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect();
        Ok((items, total))
    }

    async fn update_with_messages(
        &self,
        booking: &Booking,
        messages: &[BookingMessage],
    ) -> BookingResult<()> {
        self.bookings
            .lock()
            .unwrap()
            .insert(booking.booking_id.into_uuid(), booking.clone());
        self.messages.lock().unwrap().extend_from_slice(messages);
        Ok(())
    }

    async fn commit_approval(
        &self,
        booking: &Booking,
        message: &BookingMessage,
    ) -> BookingResult<()> {
        {
            let mut machines = self.machines.lock().unwrap();
            let machine = machines
                .get_mut(booking.machine_id.as_uuid())
                .ok_or(BookingError::MachineNotFound)?;
            machine.commit_rental(booking.quantity);
        }
        self.bookings
            .lock()
            .unwrap()
            .insert(booking.booking_id.into_uuid(), booking.clone());
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn count_by_status(&self) -> BookingResult<BookingStatistics> {
        let bookings = self.bookings.lock().unwrap();
        let count = |status: BookingStatus| {
            bookings.values().filter(|b| b.status == status).count() as i64
        };
        Ok(BookingStatistics {
            total: bookings.len() as i64,
            pending: count(BookingStatus::Pending),
            awaiting_payment: count(BookingStatus::AwaitingPayment),
            payment_sent: count(BookingStatus::PaymentSent),
            approved: count(BookingStatus::Approved),
            rejected: count(BookingStatus::Rejected),
            cancelled: count(BookingStatus::Cancelled),
        })
    }
}

impl MessageRepository for MemStore {
    async fn add_message(&self, message: &BookingMessage) -> BookingResult<()> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn list_messages(&self, booking_id: &BookingId) -> BookingResult<Vec<BookingMessage>> {
        let mut messages: Vec<BookingMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.booking_id == *booking_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn mark_read(&self, booking_id: &BookingId, from_admin: bool) -> BookingResult<u64> {
        let mut affected = 0;
        for message in self.messages.lock().unwrap().iter_mut() {
            if message.booking_id == *booking_id
                && message.is_from_admin == from_admin
                && !message.is_read
            {
                message.is_read = true;
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn unread_count_for_admin(&self) -> BookingResult<i64> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| !m.is_from_admin && !m.is_read)
            .count() as i64)
    }

    async fn unread_count_for_user(&self, user_id: &UserId) -> BookingResult<i64> {
        let bookings = self.bookings.lock().unwrap();
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| {
                m.is_from_admin
                    && !m.is_read
                    && bookings
                        .get(m.booking_id.as_uuid())
                        .is_some_and(|b| b.user_id == *user_id)
            })
            .count() as i64)
    }
}

// ============================================================================
// Pricing
// ============================================================================

mod pricing_tests {
    use super::*;

    #[test]
    fn test_rate_per_duration() {
        let m = machine(5, 0);
        assert_eq!(pricing::rate_for(&m, RentalDuration::Hour), dec!(5));
        assert_eq!(pricing::rate_for(&m, RentalDuration::Day), dec!(120));
        assert_eq!(pricing::rate_for(&m, RentalDuration::Week), dec!(750));
        assert_eq!(pricing::rate_for(&m, RentalDuration::Month), dec!(2800));
    }

    #[test]
    fn test_total_price_is_rate_times_quantity() {
        let m = machine(5, 0);
        assert_eq!(
            pricing::total_price(&m, RentalDuration::Day, 2),
            dec!(240)
        );
        assert_eq!(
            pricing::total_price(&m, RentalDuration::Month, 3),
            dec!(8400)
        );
    }

    #[test]
    fn test_unrecognized_stored_duration_falls_back_to_day() {
        assert_eq!(RentalDuration::from_code("fortnight"), None);
        assert_eq!(RentalDuration::default(), RentalDuration::Day);
    }
}

// ============================================================================
// State machine (entity level)
// ============================================================================

mod state_machine_tests {
    use super::*;

    #[test]
    fn test_happy_path_reaches_approved() {
        let admin = UserId::new();
        let mut booking = pending_booking(UserId::new(), MachineId::new());
        assert_eq!(booking.status, BookingStatus::Pending);

        booking
            .send_payment_address("bc1qaddress".to_string())
            .unwrap();
        assert_eq!(booking.status, BookingStatus::AwaitingPayment);
        assert_eq!(booking.payment_address.as_deref(), Some("bc1qaddress"));

        booking
            .mark_payment_sent(Some("0xdeadbeef".to_string()))
            .unwrap();
        assert_eq!(booking.status, BookingStatus::PaymentSent);
        assert!(booking.payment_sent_at.is_some());

        booking.approve(admin, Some("confirmed".to_string())).unwrap();
        assert_eq!(booking.status, BookingStatus::Approved);
        assert!(booking.approved_at.is_some());
        assert_eq!(booking.approved_by_id, Some(admin));
        assert_eq!(booking.admin_notes.as_deref(), Some("confirmed"));
    }

    #[test]
    fn test_awaiting_payment_only_from_pending() {
        let mut booking = pending_booking(UserId::new(), MachineId::new());
        booking.send_payment_address("addr".to_string()).unwrap();

        // Second attempt is a state violation, status unchanged
        let err = booking.send_payment_address("addr2".to_string()).unwrap_err();
        assert!(matches!(err, BookingError::NotPending));
        assert_eq!(booking.status, BookingStatus::AwaitingPayment);
        assert_eq!(booking.payment_address.as_deref(), Some("addr"));
    }

    #[test]
    fn test_payment_sent_only_from_awaiting_payment() {
        let mut booking = pending_booking(UserId::new(), MachineId::new());
        let err = booking.mark_payment_sent(None).unwrap_err();
        assert!(matches!(err, BookingError::NotAwaitingPayment));
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[test]
    fn test_approved_only_from_payment_sent() {
        let admin = UserId::new();

        let mut booking = pending_booking(UserId::new(), MachineId::new());
        assert!(matches!(
            booking.approve(admin, None).unwrap_err(),
            BookingError::NotPaymentSent
        ));

        booking.send_payment_address("addr".to_string()).unwrap();
        assert!(matches!(
            booking.approve(admin, None).unwrap_err(),
            BookingError::NotPaymentSent
        ));

        booking.mark_payment_sent(None).unwrap();
        assert!(booking.approve(admin, None).is_ok());
    }

    #[test]
    fn test_reject_fails_on_processed_bookings() {
        let admin = UserId::new();

        let mut approved = pending_booking(UserId::new(), MachineId::new());
        approved.send_payment_address("addr".to_string()).unwrap();
        approved.mark_payment_sent(None).unwrap();
        approved.approve(admin, None).unwrap();
        assert!(matches!(
            approved.reject(admin, None).unwrap_err(),
            BookingError::AlreadyProcessed
        ));

        let mut rejected = pending_booking(UserId::new(), MachineId::new());
        rejected.reject(admin, None).unwrap();
        assert!(matches!(
            rejected.reject(admin, None).unwrap_err(),
            BookingError::AlreadyProcessed
        ));

        // Cancelled bookings can still be rejected
        let mut cancelled = pending_booking(UserId::new(), MachineId::new());
        cancelled.cancel().unwrap();
        assert!(cancelled.reject(admin, None).is_ok());
    }

    #[test]
    fn test_cancel_fails_only_on_approved() {
        let admin = UserId::new();

        let mut approved = pending_booking(UserId::new(), MachineId::new());
        approved.send_payment_address("addr".to_string()).unwrap();
        approved.mark_payment_sent(None).unwrap();
        approved.approve(admin, None).unwrap();
        assert!(matches!(
            approved.cancel().unwrap_err(),
            BookingError::CannotCancelApproved
        ));

        let setups: [fn(&mut Booking); 2] = [
            |_| {},
            |b| b.send_payment_address("addr".to_string()).unwrap(),
        ];
        for build in setups {
            let mut booking = pending_booking(UserId::new(), MachineId::new());
            build(&mut booking);
            assert!(booking.cancel().is_ok());
            assert_eq!(booking.status, BookingStatus::Cancelled);
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::AwaitingPayment.is_terminal());
        assert!(!BookingStatus::PaymentSent.is_terminal());
        assert!(BookingStatus::Approved.is_terminal());
        assert!(BookingStatus::Rejected.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
    }
}

// ============================================================================
// Use cases against the in-memory store
// ============================================================================

mod use_case_tests {
    use super::*;

    fn engine(store: &MemStore) -> (
        CreateBookingUseCase<MemStore, MemStore>,
        BookingTransitionUseCase<MemStore>,
        MessageThreadUseCase<MemStore>,
        BookingQueryUseCase<MemStore>,
    ) {
        let repo = Arc::new(store.clone());
        (
            CreateBookingUseCase::new(repo.clone(), repo.clone()),
            BookingTransitionUseCase::new(repo.clone()),
            MessageThreadUseCase::new(repo.clone()),
            BookingQueryUseCase::new(repo),
        )
    }

    #[tokio::test]
    async fn test_creation_freezes_price_and_starts_pending() {
        let m = machine(5, 3);
        let machine_id = m.machine_id;
        let store = MemStore::with_machine(m);
        let (create, _, _, _) = engine(&store);

        let created = create
            .execute(
                UserId::new(),
                CreateBookingInput {
                    machine_id,
                    rental_duration: RentalDuration::Day,
                    quantity: 2,
                    user_notes: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.booking.status, BookingStatus::Pending);
        assert_eq!(created.booking.total_price, dec!(240));
        assert_eq!(created.machine_name, "Antminer S19");
        // Opening system message
        assert_eq!(store.system_message_count(&created.booking.booking_id), 1);
        // No reservation at creation time
        assert_eq!(store.rented_units(&machine_id), 3);
    }

    #[tokio::test]
    async fn test_creation_rejects_quantity_over_available() {
        let m = machine(5, 3);
        let machine_id = m.machine_id;
        let store = MemStore::with_machine(m);
        let (create, _, _, _) = engine(&store);

        // available = 2, asking 3
        let err = create
            .execute(
                UserId::new(),
                CreateBookingInput {
                    machine_id,
                    rental_duration: RentalDuration::Day,
                    quantity: 3,
                    user_notes: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::InsufficientUnits { available: 2 }));
    }

    #[tokio::test]
    async fn test_creation_rejects_inactive_machine() {
        let mut m = machine(5, 0);
        m.is_active = false;
        let machine_id = m.machine_id;
        let store = MemStore::with_machine(m);
        let (create, _, _, _) = engine(&store);

        let err = create
            .execute(
                UserId::new(),
                CreateBookingInput {
                    machine_id,
                    rental_duration: RentalDuration::Hour,
                    quantity: 1,
                    user_notes: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::MachineNotAvailable));
    }

    #[tokio::test]
    async fn test_full_workflow_appends_one_system_message_per_transition() {
        let m = machine(5, 3);
        let machine_id = m.machine_id;
        let store = MemStore::with_machine(m);
        let (create, transitions, thread, _) = engine(&store);

        let user_id = UserId::new();
        let admin_id = UserId::new();

        let created = create
            .execute(
                user_id,
                CreateBookingInput {
                    machine_id,
                    rental_duration: RentalDuration::Day,
                    quantity: 2,
                    user_notes: None,
                },
            )
            .await
            .unwrap();
        let booking_id = created.booking.booking_id;
        assert_eq!(store.system_message_count(&booking_id), 1);

        transitions
            .send_payment_address(&booking_id, admin_id, "bc1qaddress".to_string())
            .await
            .unwrap();
        assert_eq!(store.system_message_count(&booking_id), 2);

        transitions
            .mark_payment_sent(&booking_id, user_id, Some("0xhash".to_string()))
            .await
            .unwrap();
        assert_eq!(store.system_message_count(&booking_id), 3);

        transitions
            .approve(&booking_id, admin_id, None)
            .await
            .unwrap();
        assert_eq!(store.system_message_count(&booking_id), 4);

        // Inventory committed at approval
        assert_eq!(store.rented_units(&machine_id), 5);

        // Thread stays ordered ascending and carries the payment address
        let messages = thread
            .list(&booking_id, &reviewer(admin_id))
            .await
            .unwrap();
        assert!(messages.windows(2).all(|w| w[0].created_at <= w[1].created_at));
        assert!(messages
            .iter()
            .any(|m| m.message_type == MessageType::PaymentAddress
                && m.content == "bc1qaddress"));
    }

    #[tokio::test]
    async fn test_approval_clamps_inventory_instead_of_rejecting() {
        // Known race: the availability check at creation holds no
        // reservation, so overlapping requests can both get approved.
        // The commit clamps at capacity rather than failing.
        let m = machine(5, 3);
        let machine_id = m.machine_id;
        let store = MemStore::with_machine(m);
        let (_, transitions, _, _) = engine(&store);

        let user_id = UserId::new();
        let admin_id = UserId::new();

        // Booking for 4 units, created while 2 were available (simulating
        // a second request racing the first)
        let mut booking = Booking::new(
            user_id,
            machine_id,
            RentalDuration::Day,
            4,
            dec!(480),
            None,
        );
        booking.send_payment_address("addr".to_string()).unwrap();
        booking.mark_payment_sent(None).unwrap();
        let opening = BookingMessage::system(booking.booking_id, user_id, "opened".to_string());
        BookingRepository::create(&store, &booking, &opening)
            .await
            .unwrap();

        transitions
            .approve(&booking.booking_id, admin_id, None)
            .await
            .unwrap();

        // 3 + 4 would be 7; clamped to total_units = 5
        assert_eq!(store.rented_units(&machine_id), 5);
    }

    #[tokio::test]
    async fn test_requester_cannot_touch_foreign_booking() {
        let m = machine(5, 0);
        let machine_id = m.machine_id;
        let store = MemStore::with_machine(m);
        let (create, transitions, thread, queries) = engine(&store);

        let owner = UserId::new();
        let stranger = UserId::new();

        let created = create
            .execute(
                owner,
                CreateBookingInput {
                    machine_id,
                    rental_duration: RentalDuration::Week,
                    quantity: 1,
                    user_notes: None,
                },
            )
            .await
            .unwrap();
        let booking_id = created.booking.booking_id;

        assert!(matches!(
            transitions.cancel(&booking_id, stranger).await.unwrap_err(),
            BookingError::AccessDenied
        ));
        assert!(matches!(
            queries.get(&booking_id, &requester(stranger)).await.unwrap_err(),
            BookingError::AccessDenied
        ));
        assert!(matches!(
            thread
                .list(&booking_id, &requester(stranger))
                .await
                .unwrap_err(),
            BookingError::AccessDenied
        ));

        // Reviewers see everything
        assert!(queries.get(&booking_id, &reviewer(stranger)).await.is_ok());
    }

    #[tokio::test]
    async fn test_unread_counts_per_partition() {
        let m = machine(5, 0);
        let machine_id = m.machine_id;
        let store = MemStore::with_machine(m);
        let (create, _, thread, _) = engine(&store);

        let user_a = UserId::new();
        let user_b = UserId::new();
        let admin_id = UserId::new();

        let booking_a = create
            .execute(
                user_a,
                CreateBookingInput {
                    machine_id,
                    rental_duration: RentalDuration::Day,
                    quantity: 1,
                    user_notes: None,
                },
            )
            .await
            .unwrap()
            .booking
            .booking_id;
        let booking_b = create
            .execute(
                user_b,
                CreateBookingInput {
                    machine_id,
                    rental_duration: RentalDuration::Day,
                    quantity: 1,
                    user_notes: None,
                },
            )
            .await
            .unwrap()
            .booking
            .booking_id;

        // Requester messages on both bookings, admin reply on A only
        thread
            .send(&booking_a, &requester(user_a), "hello".to_string(), None)
            .await
            .unwrap();
        thread
            .send(&booking_b, &requester(user_b), "hi".to_string(), None)
            .await
            .unwrap();
        thread
            .send(&booking_a, &reviewer(admin_id), "reply".to_string(), None)
            .await
            .unwrap();

        // Reviewer counts requester-authored unread across ALL bookings
        assert_eq!(thread.unread_count(&reviewer(admin_id)).await.unwrap(), 2);

        // Requester counts reviewer-authored unread on own bookings only.
        // System messages are reviewer-partition entries too.
        assert_eq!(thread.unread_count(&requester(user_a)).await.unwrap(), 2);
        assert_eq!(thread.unread_count(&requester(user_b)).await.unwrap(), 1);

        // user_a reads the thread of booking A
        thread
            .mark_read(&booking_a, &requester(user_a))
            .await
            .unwrap();
        assert_eq!(thread.unread_count(&requester(user_a)).await.unwrap(), 0);
        // Reviewer's unread count is untouched by user_a's read
        assert_eq!(thread.unread_count(&reviewer(admin_id)).await.unwrap(), 2);

        // Admin reads booking A's requester partition
        thread
            .mark_read(&booking_a, &reviewer(admin_id))
            .await
            .unwrap();
        assert_eq!(thread.unread_count(&reviewer(admin_id)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_statistics_count_by_status() {
        let m = machine(10, 0);
        let machine_id = m.machine_id;
        let store = MemStore::with_machine(m);
        let (create, transitions, _, queries) = engine(&store);

        let admin_id = UserId::new();
        let mut ids = Vec::new();
        for _ in 0..3 {
            let created = create
                .execute(
                    UserId::new(),
                    CreateBookingInput {
                        machine_id,
                        rental_duration: RentalDuration::Day,
                        quantity: 1,
                        user_notes: None,
                    },
                )
                .await
                .unwrap();
            ids.push((created.booking.booking_id, created.booking.user_id));
        }

        transitions
            .reject(&ids[0].0, admin_id, Some("no".to_string()))
            .await
            .unwrap();
        transitions.cancel(&ids[1].0, ids[1].1).await.unwrap();

        let stats = queries.statistics().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.approved, 0);
    }
}

// ============================================================================
// DTO serialization
// ============================================================================

mod dto_tests {
    use super::*;
    use crate::presentation::dto::{BookingResponse, CreateBookingRequest};

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{
            "machineId": "00000000-0000-0000-0000-000000000000",
            "rentalDuration": "day",
            "quantity": 2,
            "userNotes": "please"
        }"#;
        let req: CreateBookingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.rental_duration, RentalDuration::Day);
        assert_eq!(req.quantity, 2);
        assert!(req.validate().is_ok());

        let bad: CreateBookingRequest = serde_json::from_str(
            r#"{"machineId":"00000000-0000-0000-0000-000000000000","rentalDuration":"hour","quantity":0}"#,
        )
        .unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_booking_response_serialization() {
        let booking = pending_booking(UserId::new(), MachineId::new());
        let response = BookingResponse::from_entity(&BookingWithMachine {
            booking,
            machine_name: "Antminer S19".to_string(),
        });

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""status":"pending""#));
        assert!(json.contains(r#""rentalDuration":"day""#));
        assert!(json.contains(r#""machineName":"Antminer S19""#));
        assert!(json.contains(r#""totalPrice":"240""#));
        // Messages omitted on list representations
        assert!(!json.contains(r#""messages""#));
    }
}

// ============================================================================
// Error surface
// ============================================================================

mod error_tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_state_violations_are_bad_requests_with_codes() {
        let cases: Vec<(BookingError, &str)> = vec![
            (BookingError::NotPending, "BOOKING_005"),
            (BookingError::NotAwaitingPayment, "BOOKING_006"),
            (BookingError::NotPaymentSent, "BOOKING_007"),
            (BookingError::AlreadyProcessed, "BOOKING_008"),
            (BookingError::CannotCancelApproved, "BOOKING_009"),
        ];
        for (err, code) in cases {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn test_lookup_and_access_errors() {
        assert_eq!(
            BookingError::BookingNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BookingError::AccessDenied.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            BookingError::InsufficientUnits { available: 2 }.to_string(),
            "Only 2 units available"
        );
    }
}
