mod membership_proptest;
