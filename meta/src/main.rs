fn main() {
    multiversx_sc_meta_lib::cli_main::<club_funding_dao::AbiProvider>();
}
