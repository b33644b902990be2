use crate::{
    Error,
    encode::{EncodeError, ValueEncoder},
    error::PreconditionError,
    value::Value,
};

///
/// DslState
///
/// The shared machinery behind every generated state type: accumulated
/// predicate buffers plus the ordered raw and encoded bound-value lists.
///
/// Invariants:
/// - `raw_values` and `encoded_values` are always the same length and
///   index-aligned; every bind pushes to both.
/// - Buffers only grow. A SELF-transition method appends at the same
///   logical depth, so repeated filters accumulate as chained ANDs.
///

#[derive(Clone, Debug, Default)]
pub struct DslState {
    where_fragments: Vec<String>,
    if_fragments: Vec<String>,
    set_fragments: Vec<String>,
    raw_values: Vec<Value>,
    encoded_values: Vec<Value>,
}

impl DslState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // fragments

    pub fn append_where(&mut self, fragment: impl Into<String>) {
        self.where_fragments.push(fragment.into());
    }

    pub fn append_if(&mut self, fragment: impl Into<String>) {
        self.if_fragments.push(fragment.into());
    }

    pub fn append_set(&mut self, fragment: impl Into<String>) {
        self.set_fragments.push(fragment.into());
    }

    // binding

    /// Record one raw/encoded pair. The two lists stay index-aligned by
    /// construction; this is the only place either list grows.
    pub fn bind(&mut self, raw: Value, encoded: Value) {
        self.raw_values.push(raw);
        self.encoded_values.push(encoded);
    }

    /// Bind a raw value, delegating the encoded form to the column's
    /// value encoder.
    pub fn bind_encoded(
        &mut self,
        column: &str,
        raw: Value,
        encoder: &dyn ValueEncoder,
    ) -> Result<(), EncodeError> {
        let encoded = encoder.encode(column, &raw)?;
        self.bind(raw, encoded);

        Ok(())
    }

    /// Bind a value whose encoded form is the raw value itself
    /// (tokens, verbatim JSON text).
    pub fn bind_passthrough(&mut self, raw: Value) {
        let encoded = raw.clone();
        self.bind(raw, encoded);
    }

    /// Append an IN predicate and bind its argument list: the whole list
    /// as a single raw value, per-element encoding as the encoded value.
    /// An empty list is a precondition failure and leaves both buffers
    /// and both value lists untouched.
    pub fn where_in(
        &mut self,
        column: &str,
        fragment: impl Into<String>,
        values: Vec<Value>,
        encoder: &dyn ValueEncoder,
    ) -> Result<(), Error> {
        if values.is_empty() {
            return Err(PreconditionError::EmptyIn {
                column: column.to_string(),
            }
            .into());
        }

        let mut encoded = Vec::with_capacity(values.len());
        for value in &values {
            encoded.push(encoder.encode(column, value)?);
        }

        self.append_where(fragment);
        self.bind(Value::List(values), Value::List(encoded));

        Ok(())
    }

    // accessors

    /// Accumulated WHERE text, fragments joined with AND.
    #[must_use]
    pub fn where_clause(&self) -> String {
        self.where_fragments.join(" AND ")
    }

    /// Accumulated IF text, fragments joined with AND.
    #[must_use]
    pub fn if_clause(&self) -> String {
        self.if_fragments.join(" AND ")
    }

    /// Accumulated SET text, fragments joined with commas.
    #[must_use]
    pub fn set_clause(&self) -> String {
        self.set_fragments.join(", ")
    }

    #[must_use]
    pub fn raw_values(&self) -> &[Value] {
        &self.raw_values
    }

    #[must_use]
    pub fn encoded_values(&self) -> &[Value] {
        &self.encoded_values
    }

    #[must_use]
    pub fn bound_len(&self) -> usize {
        debug_assert_eq!(self.raw_values.len(), self.encoded_values.len());
        self.raw_values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::PassthroughEncoder;

    #[test]
    fn bind_keeps_lists_aligned() {
        let mut state = DslState::new();

        state.append_where("\"id\" = ?");
        state
            .bind_encoded("id", Value::Int(7), &PassthroughEncoder)
            .unwrap();

        assert_eq!(state.raw_values().len(), state.encoded_values().len());
        assert_eq!(state.bound_len(), 1);
        assert_eq!(state.where_clause(), "\"id\" = ?");
    }

    #[test]
    fn repeated_filters_accumulate_as_ands() {
        let mut state = DslState::new();

        state.append_where("\"a\" > ?");
        state.bind_passthrough(Value::Int(1));
        state.append_where("\"a\" < ?");
        state.bind_passthrough(Value::Int(9));

        assert_eq!(state.where_clause(), "\"a\" > ? AND \"a\" < ?");
        assert_eq!(state.bound_len(), 2);
    }

    #[test]
    fn in_binds_whole_list_raw_and_per_element_encoded() {
        let mut state = DslState::new();

        state
            .where_in(
                "id",
                "\"id\" IN ?",
                vec![Value::Int(1), Value::Int(2)],
                &PassthroughEncoder,
            )
            .unwrap();

        assert_eq!(state.bound_len(), 1);
        assert_eq!(state.raw_values()[0].as_list().unwrap().len(), 2);
        assert_eq!(state.encoded_values()[0].as_list().unwrap().len(), 2);
    }

    #[test]
    fn empty_in_is_a_precondition_failure_with_no_fragment() {
        let mut state = DslState::new();

        let err = state
            .where_in("id", "\"id\" IN ?", vec![], &PassthroughEncoder)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::PreconditionError(PreconditionError::EmptyIn { .. })
        ));
        assert_eq!(state.where_clause(), "");
        assert_eq!(state.bound_len(), 0);
    }

    mod property {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Eq(i64),
            Range(i64, i64),
            In(Vec<i64>),
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                any::<i64>().prop_map(Op::Eq),
                (any::<i64>(), any::<i64>()).prop_map(|(a, b)| Op::Range(a, b)),
                prop::collection::vec(any::<i64>(), 1..5).prop_map(Op::In),
            ]
        }

        proptest! {
            #[test]
            fn value_lists_stay_aligned_under_any_call_sequence(
                ops in prop::collection::vec(arb_op(), 0..16)
            ) {
                let mut state = DslState::new();

                for op in &ops {
                    match op {
                        Op::Eq(v) => {
                            state.append_where("\"c\" = ?");
                            state
                                .bind_encoded("c", Value::Int(*v), &PassthroughEncoder)
                                .unwrap();
                        }
                        Op::Range(lo, hi) => {
                            state.append_where("\"c\" > ? AND \"c\" < ?");
                            state.bind_passthrough(Value::Int(*lo));
                            state.bind_passthrough(Value::Int(*hi));
                        }
                        Op::In(values) => {
                            let values = values.iter().copied().map(Value::Int).collect();
                            state
                                .where_in("c", "\"c\" IN ?", values, &PassthroughEncoder)
                                .unwrap();
                        }
                    }
                }

                prop_assert_eq!(state.raw_values().len(), state.encoded_values().len());
            }
        }
    }

    #[test]
    fn if_and_set_buffers_are_independent() {
        let mut state = DslState::new();

        state.append_if("\"name\" = ?");
        state.append_set("\"name\" = fromJson(?)");

        assert_eq!(state.where_clause(), "");
        assert_eq!(state.if_clause(), "\"name\" = ?");
        assert_eq!(state.set_clause(), "\"name\" = fromJson(?)");
    }
}
