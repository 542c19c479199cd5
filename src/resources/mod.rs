//! REST resource bindings.
//!
//! Each resource module holds the payload types, their singular and plural
//! JSON envelopes, the list filters and a service borrowing the shared
//! [`Client`](crate::client::Client).

pub mod payment_transaction;
pub mod refund;
pub mod tender_transaction;

pub use payment_transaction::{
    PaymentTransaction, PaymentTransactionListOptions, PaymentTransactionResource,
    PaymentTransactionService, PaymentTransactionsResource,
};
pub use refund::{
    Refund, RefundLineItem, RefundResource, RefundService, RefundTransaction, RefundsResource,
};
pub use tender_transaction::{
    TenderTransaction, TenderTransactionListOptions, TenderTransactionPaymentDetails,
    TenderTransactionResource, TenderTransactionService, TenderTransactionsResource,
};
