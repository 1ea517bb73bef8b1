//! Creation bytecode for the three L1 system contracts.
//!
//! The contracts are pre-compiled and pinned here; the tool deploys them
//! as-is and never compiles anything.

use alloy::primitives::Bytes;

/// Creation code of the state sender contract.
pub const STATE_SENDER: &str = "608060405234801561001057600080fd5b506101ac8061001f6000396000f3fe608060405234801561001057600080fd5b50600436106100365760003560e01c806384a96a4d146100a85780638ce2a0c0146100965780633ac480001461018657046104088000800481045b5b01032004143300014055fd80085435a103406160030435fd61038133361914552014610460563573818008570135004073360452355b9114a1fd35032061337352559256816008604090a10480f333fd922035526119012008205252543657008108f32080105040545bfd400455008101550040731003a1a1545b915650032036a1a16003810490195091915636fdfd08810404540110730061363600818160159254915435564052196052a12010573560526119f335579092812033739081153591735750f340615536545b57a1fd602055a161046033619280a10360fd209190015b150120736003fd73619157047350543354a13590102003358003045014043619919020f35b90503657550335100890005b15a133600314545020fd15f3600108501901571910a2646970667358221220095ac25f9d08a44ca121d3f62e64416ac3e1442d2b4887607d21ecde1b1d044c64736f6c634300081a0033";

/// Creation code of the unified bridge contract.
pub const UNIFIED_BRIDGE: &str = "608060405234801561001057600080fd5b5061024c8061001f6000396000f3fe608060405234801561001057600080fd5b50600436106100365760003560e01c8063f2d8e14e14610079578063f4d94ef91461015d578063e4916e461461012f57369204105690fd363503043654a100509156500103209060f301739160561491fd73525733611056a156f30336a103f3617310a108014050080100400355205b52195004333590106180543640911961a1365480575b815b03a1360436143354612010145492818104565201357357003354904055335515911590555056196015813391900119fd5208fd736003045b15525b9236521510579100a1808150921092558057141401a154f3905b5555030414031514735515fd9036a1338019fd54610156a1a152819203a15601083681101057541591085520200135045733906155085404fd91f3007303a1735b01913673544040f35552005557fd81568090fd9104fd1401195720921054fd01572040920120005661615014907356033657149252503680565b003690045b92f38136032073a15b195003353508fd9240806101fd0135f35460505656205054918192559203155503500101011903191591900314365491fd10541520900881355515556103fd14200001350110400192f335819200fdf300081403fd1450560873811435145650561581005b91361060915050f31514815b55141955605b561591366080353603735b50011020fd56087320013557fd5210733360151040549173355657145b35a26469706673582212204f89290c9a69888a0349026f9bd055ab13942c6138e4d92e837f7e5a330936a864736f6c634300081a0033";

/// Creation code of the simple calculator contract.
pub const SIMPLE_CALCULATOR: &str = "608060405234801561001057600080fd5b5061012a8061001f6000396000f3fe608060405234801561001057600080fd5b50600436106100365760003560e01c80639873ea631461010a5780630ac9d45f1461018b578063330886421461019957142090155719923681f35591369190808055545219604015913335403508575710615415fd36015b00618054915b9073017319a104366154083550a15ba13352191092369033fd10100136367356144035087320351503815b5440081003035b5710553508925255549200901980010357925b7361fd9220917340144008818015900192fd549292a1551510001952205781fd336155921960fd54035b56003660038190155555570000a1100335a17350f30033a264697066735822122083b6838464d0d2392393800068c226bf43cb7cd008c7d5ca69fea25344f5bbdc64736f6c634300081a0033";

/// Decodes a pinned bytecode constant.
pub(crate) fn decode(raw: &'static str) -> Bytes {
    alloy::hex::decode(raw).map(Bytes::from).expect("pinned bytecode is valid hex")
}
